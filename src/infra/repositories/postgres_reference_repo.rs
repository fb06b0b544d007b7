use crate::domain::{models::reference::{DtcCode, MaintenanceBand}, ports::ReferenceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresReferenceRepo {
    pool: PgPool,
}

impl PostgresReferenceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceRepository for PostgresReferenceRepo {
    async fn find_codes(&self, codes: &[String]) -> Result<Vec<DtcCode>, AppError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, DtcCode>("SELECT code, generic_meaning FROM dtc_codes WHERE code = ANY($1)")
            .bind(codes)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_band(&self, mileage: i32) -> Result<Option<MaintenanceBand>, AppError> {
        sqlx::query_as::<_, MaintenanceBand>(
            "SELECT id, min_mileage, max_mileage, context FROM maintenance_bands WHERE min_mileage <= $1 AND max_mileage >= $1 ORDER BY min_mileage DESC LIMIT 1"
        )
            .bind(mileage)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
