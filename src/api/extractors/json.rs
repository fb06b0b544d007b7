use axum::extract::FromRequest;
use crate::error::AppError;

/// JSON body whose malformed or mistyped input rejects as a 400 `{"error": ..}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
