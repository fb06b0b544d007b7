use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::extractors::{auth::AuthSession, json::ApiJson};
use crate::api::dtos::requests::{UpdateShopSettingsRequest, UpdateUserSettingsRequest};
use crate::api::dtos::responses::{ShopSettingsResponse, UserSummary};
use crate::domain::services::settings_service::ShopSettingsUpdate;
use std::sync::Arc;

pub async fn get_shop_settings(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let shop = state.settings_service.shop_settings(&session.shop_id).await?
        .ok_or(AppError::NotFound("Shop not found".into()))?;

    Ok(Json(ShopSettingsResponse::from(shop)))
}

pub async fn update_shop_settings(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    ApiJson(payload): ApiJson<UpdateShopSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let update = ShopSettingsUpdate {
        display_name: payload.display_name,
        phone: payload.phone,
        address: payload.address,
        default_report_mode: payload.default_report_mode,
        default_report_tone: payload.default_report_tone,
        default_include_maint: payload.default_include_maint,
    };

    let shop = state.settings_service.update_shop_settings(&session.shop_id, update).await?
        .ok_or(AppError::NotFound("Shop not found".into()))?;

    Ok(Json(ShopSettingsResponse::from(shop)))
}

pub async fn get_user_settings(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let user = state.settings_service.user_settings(&session.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(UserSummary::from(user)))
}

pub async fn update_user_settings(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    ApiJson(payload): ApiJson<UpdateUserSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.settings_service.update_user_settings(&session.user_id, payload.display_name).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(UserSummary::from(user)))
}
