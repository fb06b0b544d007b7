use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_OWNER: &str = "owner";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub shop_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: String,
    pub oauth_provider: Option<String>,
    pub oauth_sub: Option<String>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(shop_id: String, email: &str, password_hash: String, display_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id,
            email: email.trim().to_lowercase(),
            password_hash,
            display_name,
            role: ROLE_OWNER.to_string(),
            oauth_provider: None,
            oauth_sub: None,
            email_verified_at: None,
            created_at: Utc::now(),
        }
    }
}
