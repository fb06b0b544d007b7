use crate::domain::models::{
    report::{Report, ReportFilters},
    reference::{DtcCode, MaintenanceBand},
    shop::Shop,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Shop>, AppError>;
    async fn update(&self, shop: &Shop) -> Result<Shop, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the shop and its first user atomically; the user is bound to the new shop.
    async fn create_with_shop(&self, shop: &Shop, user: &User) -> Result<(Shop, User), AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_oauth_sub(&self, provider: &str, sub: &str) -> Result<Option<User>, AppError>;
    async fn update_display_name(&self, id: &str, display_name: Option<&str>) -> Result<Option<User>, AppError>;
}

/// Every read and delete is scoped by shop id.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, report: &Report) -> Result<Report, AppError>;
    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Report>, AppError>;
    async fn list(&self, shop_id: &str, user_id: Option<&str>, filters: &ReportFilters, limit: i64) -> Result<Vec<Report>, AppError>;
    async fn delete(&self, shop_id: &str, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn find_codes(&self, codes: &[String]) -> Result<Vec<DtcCode>, AppError>;
    async fn find_band(&self, mileage: i32) -> Result<Option<MaintenanceBand>, AppError>;
}

#[async_trait]
pub trait LlmService: Send + Sync {
    /// Runs one chat completion that must answer with a single JSON object.
    /// Returns the raw message content, unparsed.
    async fn generate_json(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AppError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthProfile {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;
    fn authorization_url(&self, state: &str, redirect_hint: Option<&str>) -> String;
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, AppError>;
    async fn fetch_profile(&self, access_token: &str) -> Result<OAuthProfile, AppError>;
}
