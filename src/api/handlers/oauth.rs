use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{OAuthCallbackQuery, OAuthStartQuery};
use crate::api::dtos::responses::AuthUrlResponse;
use crate::api::handlers::auth::set_session_cookie;
use crate::domain::services::oauth_state::sanitize_redirect;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{error, info, warn};

pub async fn google_start(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OAuthStartQuery>,
) -> impl IntoResponse {
    let redirect = sanitize_redirect(query.redirect.as_deref());
    let oauth_state = state.oauth_state.encode(&redirect);
    let url = state.oauth_provider.authorization_url(&oauth_state, query.redirect.as_deref());

    Json(AuthUrlResponse { url })
}

/// Always answers with a 302: to the carried redirect path on success, or to
/// the login page with a `googleError` code otherwise.
pub async fn google_callback(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Query(query): Query<OAuthCallbackQuery>,
) -> Response {
    let base_url = &state.config.app_base_url;

    if let Some(provider_error) = query.error {
        warn!("OAuth provider returned error: {}", provider_error);
        return login_error(base_url, &provider_error);
    }

    let (Some(code), Some(raw_state)) = (query.code, query.state) else {
        return login_error(base_url, "missing_code_or_state");
    };

    let Some(redirect) = state.oauth_state.decode(&raw_state) else {
        warn!("OAuth callback rejected: state signature invalid");
        return login_error(base_url, "invalid_state");
    };

    match complete_sign_in(&state, &code).await {
        Ok(token) => {
            set_session_cookie(&cookies, token, state.config.production);
            found(&format!("{}{}", base_url, redirect))
        }
        Err(AppError::Conflict(_)) => login_error(base_url, "email_in_use"),
        Err(e) => {
            error!("OAuth callback failed: {}", e);
            login_error(base_url, "callback_failed")
        }
    }
}

async fn complete_sign_in(state: &AppState, code: &str) -> Result<String, AppError> {
    let provider = state.oauth_provider.as_ref();
    let tokens = provider.exchange_code(code).await?;
    let profile = provider.fetch_profile(&tokens.access_token).await?;

    let (account, created) = state.account_service
        .resolve_or_create_from_oauth(provider.provider_name(), &profile)
        .await?;

    info!("OAuth sign-in for user {} (new account: {})", account.user.id, created);
    state.session_service.issue(&account.user.id, &account.shop.id)
}

fn login_error(base_url: &str, code: &str) -> Response {
    let encoded: String = url::form_urlencoded::byte_serialize(code.as_bytes()).collect();
    found(&format!("{}/login?googleError={}", base_url, encoded))
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
