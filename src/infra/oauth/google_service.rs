use crate::domain::ports::{OAuthProfile, OAuthProvider, OAuthTokens};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::error;
use url::Url;

const GOOGLE_AUTH_BASE: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

pub struct GoogleOAuthService {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuthService {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            client_id,
            client_secret,
            redirect_uri,
        }
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthService {
    fn provider_name(&self) -> &'static str {
        "google"
    }

    fn authorization_url(&self, state: &str, redirect_hint: Option<&str>) -> String {
        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", "openid email profile"),
            ("access_type", "offline"),
            ("include_granted_scopes", "true"),
            ("state", state),
        ];
        if redirect_hint.is_some() {
            params.push(("prompt", "consent"));
        }

        match Url::parse_with_params(GOOGLE_AUTH_BASE, &params) {
            Ok(url) => url.to_string(),
            Err(e) => {
                error!("Failed to build Google authorization URL: {}", e);
                GOOGLE_AUTH_BASE.to_string()
            }
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, AppError> {
        let form = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.client.post(GOOGLE_TOKEN_URL)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("EXCHANGE_FAILED: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("EXCHANGE_FAILED: {} {}", status, text)));
        }

        response.json::<OAuthTokens>().await
            .map_err(|e| AppError::Upstream(format!("EXCHANGE_FAILED: malformed token response: {}", e)))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<OAuthProfile, AppError> {
        let response = self.client.get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("PROFILE_FETCH_FAILED: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("PROFILE_FETCH_FAILED: {} {}", status, text)));
        }

        response.json::<OAuthProfile>().await
            .map_err(|e| AppError::Upstream(format!("PROFILE_FETCH_FAILED: malformed profile: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url_carries_client_scopes_and_state() {
        let service = GoogleOAuthService::new(
            "client-123".into(),
            "secret".into(),
            "http://localhost:3000/auth/google/callback".into(),
        );
        let url = Url::parse(&service.authorization_url("abc.def", None)).unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["redirect_uri"], "http://localhost:3000/auth/google/callback");
        assert_eq!(params["scope"], "openid email profile");
        assert_eq!(params["state"], "abc.def");
        assert!(!params.contains_key("prompt"));

        let with_hint = service.authorization_url("s", Some("/app/history"));
        assert!(with_hint.contains("prompt=consent"));
    }
}
