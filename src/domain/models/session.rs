use serde::{Deserialize, Serialize};

/// Authenticated identity reconstructed from the session cookie on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub shop_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "shopId", default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<String>,
    pub iat: usize,
    pub exp: usize,
}
