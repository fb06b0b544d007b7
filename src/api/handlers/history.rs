use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::extractors::auth::AuthSession;
use crate::api::dtos::requests::HistoryQuery;
use crate::api::dtos::responses::{OkResponse, ReportListResponse, ReportResponse};
use crate::domain::models::report::ReportFilters;
use crate::domain::services::csv_export::reports_to_csv;
use crate::domain::services::history_service::{non_blank, parse_range_bound, RangeEdge};
use crate::domain::services::pdf_export::render_report_pdf;
use std::sync::Arc;
use tracing::info;

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mine = query.mine.unwrap_or(false);
    let filters = build_filters(query)?;
    let user_id = mine.then_some(session.user_id.as_str());

    let reports = state.history_service.list(&session.shop_id, user_id, &filters).await?;

    Ok(Json(ReportListResponse {
        reports: reports.into_iter().map(ReportResponse::from).collect(),
    }))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.history_service.get_by_id(&session.shop_id, &id).await?
        .ok_or(AppError::NotFound("Not found".into()))?;

    Ok(Json(ReportResponse::from(report)))
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.history_service.delete(&session.shop_id, &id).await? {
        return Err(AppError::NotFound("Not found".into()));
    }

    info!("Report deleted: {}", id);
    Ok(Json(OkResponse { ok: true }))
}

pub async fn report_pdf(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.history_service.get_by_id(&session.shop_id, &id).await?
        .ok_or(AppError::NotFound("Not found".into()))?;

    let bytes = render_report_pdf(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=obdscribe-report-{}.pdf", report.id)),
        ],
        bytes,
    ))
}

/// CSV of the caller's own reports.
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filters = build_filters(query)?;
    let reports = state.history_service
        .list(&session.shop_id, Some(&session.user_id), &filters)
        .await?;

    let bytes = reports_to_csv(&reports)?;
    info!("Exported {} reports as CSV", reports.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"obdscribe-history.csv\""),
        ],
        bytes,
    ))
}

fn build_filters(query: HistoryQuery) -> Result<ReportFilters, AppError> {
    let from = non_blank(query.from)
        .map(|raw| parse_range_bound(&raw, RangeEdge::Start))
        .transpose()?;
    let to = non_blank(query.to)
        .map(|raw| parse_range_bound(&raw, RangeEdge::End))
        .transpose()?;

    Ok(ReportFilters {
        make: non_blank(query.make),
        model: non_blank(query.model),
        code: non_blank(query.code),
        q: non_blank(query.q),
        from,
        to,
    })
}
