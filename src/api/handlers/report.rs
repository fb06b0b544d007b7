use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::extractors::{auth::AuthSession, client::ClientKey, json::ApiJson};
use crate::api::dtos::requests::GenerateReportRequest;
use crate::api::dtos::responses::GenerateReportResponse;
use crate::domain::models::{report::{GenerateReportInput, Vehicle}, shop::ReportMode};
use crate::domain::services::history_service::non_blank;
use std::sync::Arc;
use tracing::{error, info, warn};

pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    ClientKey(client): ClientKey,
    ApiJson(payload): ApiJson<GenerateReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !state.rate_limiter.check(&client) {
        warn!("Rate limit exceeded for {}", client);
        return Err(AppError::RateLimited);
    }

    let shop = state.shop_repo.find_by_id(&session.shop_id).await?
        .ok_or(AppError::NotFound("Shop not found".into()))?;

    let complaint = non_blank(payload.complaint)
        .ok_or(AppError::Validation("Complaint and codes are required".into()))?;
    let codes = payload.codes
        .map(|c| c.into_vec())
        .ok_or(AppError::Validation("Complaint and codes are required".into()))?;

    let (Some(year), Some(make), Some(model)) = (payload.year, non_blank(payload.make), non_blank(payload.model)) else {
        return Err(AppError::Validation("Vehicle year, make and model are required".into()));
    };
    if payload.mileage.is_some_and(|m| m < 0) {
        return Err(AppError::Validation("Mileage cannot be negative".into()));
    }

    let mode = match non_blank(payload.mode) {
        Some(raw) => raw.parse::<ReportMode>().map_err(AppError::Validation)?,
        None => shop.report_mode(),
    };

    let input = GenerateReportInput {
        shop_id: session.shop_id,
        user_id: session.user_id,
        vehicle: Vehicle {
            year,
            make,
            model,
            trim: non_blank(payload.trim),
            mileage: payload.mileage,
        },
        codes,
        complaint,
        notes: non_blank(payload.notes),
        mode,
    };

    let generated = match state.report_service.generate(input, shop.report_tone()).await {
        Ok(generated) => generated,
        Err(e @ AppError::Validation(_)) => return Err(e),
        Err(e) => {
            error!("Failed to generate report: {}", e);
            return Err(AppError::GenerationFailed);
        }
    };

    info!("Report generated: {}", generated.id);

    Ok(Json(GenerateReportResponse {
        id: generated.id,
        report: generated.content,
    }))
}
