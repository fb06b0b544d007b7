use crate::domain::models::session::{Session, SessionClaims};
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

pub const SESSION_COOKIE: &str = "obdscribe_session";
pub const SESSION_TTL_DAYS: i64 = 7;

/// Issues and verifies the HS256-signed session token stored in the session cookie.
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, user_id: &str, shop_id: &str) -> Result<String, AppError> {
        self.issue_at(user_id, shop_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: &str, shop_id: &str, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = SessionClaims {
            user_id: Some(user_id.to_string()),
            shop_id: Some(shop_id.to_string()),
            iat: issued_at.timestamp() as usize,
            exp: (issued_at + Duration::days(SESSION_TTL_DAYS)).timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Session token encoding failed: {}", e);
                AppError::Internal
            })
    }

    /// Never fails: any defect in the token yields `None`.
    pub fn parse(&self, token: Option<&str>) -> Option<Session> {
        let token = token.filter(|t| !t.is_empty())?;
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).ok()?;

        let user_id = data.claims.user_id.filter(|v| !v.is_empty())?;
        let shop_id = data.claims.shop_id.filter(|v| !v.is_empty())?;

        Some(Session { user_id, shop_id })
    }
}
