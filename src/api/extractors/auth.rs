use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::session::Session;
use crate::domain::services::session_service::SESSION_COOKIE;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{warn, Span};

/// Identity of the caller, taken from the session cookie.
///
/// Outside production a configured development identity stands in for a
/// missing or invalid cookie.
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::InternalWithMsg("Cookie layer missing".into()))?;

        let token = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());

        let session = match app_state.session_service.parse(token.as_deref()) {
            Some(session) => session,
            None => match &app_state.config.dev_identity {
                Some(dev) if !app_state.config.production => {
                    warn!("No valid session, binding request to development identity {}", dev.user_id);
                    Session { user_id: dev.user_id.clone(), shop_id: dev.shop_id.clone() }
                }
                _ => return Err(AppError::Unauthorized),
            },
        };

        Span::current().record("shop_id", &session.shop_id);
        Span::current().record("user_id", &session.user_id);

        Ok(AuthSession(session))
    }
}
