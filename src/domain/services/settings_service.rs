use std::sync::Arc;
use crate::domain::{
    models::{shop::{ReportMode, ReportTone, Shop}, user::User},
    ports::{ShopRepository, UserRepository},
};
use crate::domain::services::account_service::validate_display_name;
use crate::error::AppError;
use tracing::info;

#[derive(Debug, Default, Clone)]
pub struct ShopSettingsUpdate {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub default_report_mode: Option<String>,
    pub default_report_tone: Option<String>,
    pub default_include_maint: Option<bool>,
}

pub struct SettingsService {
    shop_repo: Arc<dyn ShopRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl SettingsService {
    pub fn new(shop_repo: Arc<dyn ShopRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self { shop_repo, user_repo }
    }

    pub async fn shop_settings(&self, shop_id: &str) -> Result<Option<Shop>, AppError> {
        self.shop_repo.find_by_id(shop_id).await
    }

    /// Absent fields keep their stored value. Unknown mode or tone values are rejected.
    pub async fn update_shop_settings(&self, shop_id: &str, update: ShopSettingsUpdate) -> Result<Option<Shop>, AppError> {
        let mode = update.default_report_mode.as_deref()
            .map(str::parse::<ReportMode>)
            .transpose()
            .map_err(|_| AppError::Validation("Invalid defaultReportMode".into()))?;
        let tone = update.default_report_tone.as_deref()
            .map(str::parse::<ReportTone>)
            .transpose()
            .map_err(|_| AppError::Validation("Invalid defaultReportTone".into()))?;

        let Some(mut shop) = self.shop_repo.find_by_id(shop_id).await? else {
            return Ok(None);
        };

        if let Some(display_name) = update.display_name {
            shop.display_name = Some(display_name);
        }
        if let Some(phone) = update.phone {
            shop.phone = Some(phone);
        }
        if let Some(address) = update.address {
            shop.address = Some(address);
        }
        if let Some(mode) = mode {
            shop.default_report_mode = mode.to_string();
        }
        if let Some(tone) = tone {
            shop.default_report_tone = tone.to_string();
        }
        if let Some(include) = update.default_include_maint {
            shop.default_include_maint = include;
        }

        let updated = self.shop_repo.update(&shop).await?;
        info!("Shop settings updated: {}", shop_id);
        Ok(Some(updated))
    }

    pub async fn user_settings(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_id(user_id).await
    }

    /// Only the display name is editable here; email stays fixed.
    pub async fn update_user_settings(&self, user_id: &str, display_name: Option<String>) -> Result<Option<User>, AppError> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let Some(display_name) = display_name else {
            return Ok(Some(user));
        };
        validate_display_name(&display_name)?;

        let updated = self.user_repo.update_display_name(user_id, Some(display_name.trim())).await?;
        info!("User settings updated: {}", user_id);
        Ok(updated)
    }
}
