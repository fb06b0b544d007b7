use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::shop::ReportMode;

pub const PROMPT_VERSION: &str = "1";

pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_DEGRADED: &str = "DEGRADED";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Report {
    pub id: String,
    pub shop_id: String,
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
    pub maintenance_suggestions: String,
    pub prompt_version: String,
    pub mode: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(input: &GenerateReportInput, codes: &[String], content: &GeneratedContent, degraded: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id: input.shop_id.clone(),
            user_id: input.user_id.clone(),
            vehicle_year: input.vehicle.year,
            vehicle_make: input.vehicle.make.clone(),
            vehicle_model: input.vehicle.model.clone(),
            vehicle_trim: input.vehicle.trim.clone(),
            mileage: input.vehicle.mileage,
            codes_raw: codes.join(", "),
            complaint: input.complaint.clone(),
            notes: input.notes.clone().unwrap_or_default(),
            tech_view: content.tech_view.clone(),
            customer_view: content.customer_view.clone(),
            maintenance_suggestions: serde_json::to_string(&content.maintenance_suggestions)
                .unwrap_or_else(|_| "[]".to_string()),
            prompt_version: PROMPT_VERSION.to_string(),
            mode: input.mode.to_string(),
            status: if degraded { STATUS_DEGRADED } else { STATUS_COMPLETED }.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        serde_json::from_str(&self.maintenance_suggestions).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct GenerateReportInput {
    pub shop_id: String,
    pub user_id: String,
    pub vehicle: Vehicle,
    pub codes: Vec<String>,
    pub complaint: String,
    pub notes: Option<String>,
    pub mode: ReportMode,
}

/// Model output after defensive coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub tech_view: String,
    pub customer_view: String,
    pub maintenance_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    pub make: Option<String>,
    pub model: Option<String>,
    pub code: Option<String>,
    pub q: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
