use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DtcCode {
    pub code: String,
    pub generic_meaning: String,
}

/// Mileage interval `[min_mileage, max_mileage]` with its service guidance.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceBand {
    #[serde(skip)]
    pub id: i64,
    pub min_mileage: i32,
    pub max_mileage: i32,
    pub context: String,
}
