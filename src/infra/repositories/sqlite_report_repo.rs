use crate::domain::{models::report::{Report, ReportFilters}, ports::ReportRepository};
use crate::error::AppError;
use super::escape_like;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteReportRepo {
    pool: SqlitePool,
}

impl SqliteReportRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for SqliteReportRepo {
    async fn create(&self, report: &Report) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(
            "INSERT INTO reports (id, shop_id, user_id, vehicle_year, vehicle_make, vehicle_model, vehicle_trim, mileage, codes_raw, complaint, notes, tech_view, customer_view, maintenance_suggestions, prompt_version, mode, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&report.id)
            .bind(&report.shop_id)
            .bind(&report.user_id)
            .bind(report.vehicle_year)
            .bind(&report.vehicle_make)
            .bind(&report.vehicle_model)
            .bind(&report.vehicle_trim)
            .bind(report.mileage)
            .bind(&report.codes_raw)
            .bind(&report.complaint)
            .bind(&report.notes)
            .bind(&report.tech_view)
            .bind(&report.customer_view)
            .bind(&report.maintenance_suggestions)
            .bind(&report.prompt_version)
            .bind(&report.mode)
            .bind(&report.status)
            .bind(report.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Report>, AppError> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE shop_id = ? AND id = ?")
            .bind(shop_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, shop_id: &str, user_id: Option<&str>, filters: &ReportFilters, limit: i64) -> Result<Vec<Report>, AppError> {
        sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE shop_id = ?1 \
             AND (?2 IS NULL OR user_id = ?2) \
             AND (?3 IS NULL OR vehicle_make = ?3) \
             AND (?4 IS NULL OR vehicle_model = ?4) \
             AND (?5 IS NULL OR LOWER(codes_raw) LIKE '%' || LOWER(?5) || '%' ESCAPE '\\') \
             AND (?6 IS NULL OR LOWER(complaint) LIKE '%' || LOWER(?6) || '%' ESCAPE '\\') \
             AND (?7 IS NULL OR created_at >= ?7) \
             AND (?8 IS NULL OR created_at <= ?8) \
             ORDER BY created_at DESC LIMIT ?9"
        )
            .bind(shop_id)
            .bind(user_id)
            .bind(&filters.make)
            .bind(&filters.model)
            .bind(filters.code.as_deref().map(escape_like))
            .bind(filters.q.as_deref().map(escape_like))
            .bind(filters.from)
            .bind(filters.to)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, shop_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE shop_id = ? AND id = ?")
            .bind(shop_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite Report Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
