use crate::domain::{models::shop::Shop, ports::ShopRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteShopRepo {
    pool: SqlitePool,
}

impl SqliteShopRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopRepository for SqliteShopRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Shop>, AppError> {
        sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, shop: &Shop) -> Result<Shop, AppError> {
        sqlx::query_as::<_, Shop>(
            "UPDATE shops SET name=?, display_name=?, phone=?, address=?, default_report_mode=?, default_report_tone=?, default_include_maint=? WHERE id=? RETURNING *"
        )
            .bind(&shop.name)
            .bind(&shop.display_name)
            .bind(&shop.phone)
            .bind(&shop.address)
            .bind(&shop.default_report_mode)
            .bind(&shop.default_report_tone)
            .bind(shop.default_include_maint)
            .bind(&shop.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
