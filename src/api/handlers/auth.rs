use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::extractors::json::ApiJson;
use crate::api::dtos::requests::{LoginRequest, SignupRequest};
use crate::api::dtos::responses::{AccountResponse, MessageResponse, ShopSummary};
use crate::domain::services::account_service::SignupInput;
use crate::domain::services::session_service::{SESSION_COOKIE, SESSION_TTL_DAYS};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::info;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.account_service.create_password_account(SignupInput {
        email: payload.email,
        password: payload.password,
        display_name: payload.display_name,
        shop_name: payload.shop_name,
    }).await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            user: account.user.into(),
            shop: ShopSummary { id: account.shop.id, name: account.shop.name },
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }

    let user = state.account_service.verify_password(&payload.email, &payload.password).await?
        .ok_or(AppError::Unauthorized)?;

    let token = state.session_service.issue(&user.id, &user.shop_id)?;
    set_session_cookie(&cookies, token, state.config.production);

    info!("User logged in: {}", user.id);

    Ok(Json(MessageResponse { message: "ok" }))
}

pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());
    info!("User logged out");
    StatusCode::OK
}

pub(crate) fn set_session_cookie(cookies: &Cookies, token: String, secure: bool) {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(Duration::days(SESSION_TTL_DAYS));
    cookies.add(cookie);
}
