use crate::domain::models::{report::{GeneratedContent, Report}, shop::Shop, user::User};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
        }
    }
}

#[derive(Serialize)]
pub struct ShopSummary {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub user: UserSummary,
    pub shop: ShopSummary,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[derive(Serialize)]
pub struct GenerateReportResponse {
    pub id: String,
    pub report: GeneratedContent,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub user_id: String,
    pub vehicle_year: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_trim: Option<String>,
    pub mileage: Option<i32>,
    pub codes_raw: String,
    pub complaint: String,
    pub notes: String,
    pub tech_view: String,
    pub customer_view: String,
    pub maintenance_suggestions: Vec<String>,
    pub prompt_version: String,
    pub mode: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        let maintenance_suggestions = report.suggestions();
        Self {
            id: report.id,
            user_id: report.user_id,
            vehicle_year: report.vehicle_year,
            vehicle_make: report.vehicle_make,
            vehicle_model: report.vehicle_model,
            vehicle_trim: report.vehicle_trim,
            mileage: report.mileage,
            codes_raw: report.codes_raw,
            complaint: report.complaint,
            notes: report.notes,
            tech_view: report.tech_view,
            customer_view: report.customer_view,
            maintenance_suggestions,
            prompt_version: report.prompt_version,
            mode: report.mode,
            status: report.status,
            created_at: report.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSettingsResponse {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub default_report_mode: String,
    pub default_report_tone: String,
    pub default_include_maint: bool,
}

impl From<Shop> for ShopSettingsResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id,
            name: shop.name,
            display_name: shop.display_name,
            phone: shop.phone,
            address: shop.address,
            default_report_mode: shop.default_report_mode,
            default_report_tone: shop.default_report_tone,
            default_include_maint: shop.default_include_maint,
        }
    }
}
