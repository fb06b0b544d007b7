use crate::domain::{models::shop::Shop, ports::ShopRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresShopRepo {
    pool: PgPool,
}

impl PostgresShopRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopRepository for PostgresShopRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Shop>, AppError> {
        sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, shop: &Shop) -> Result<Shop, AppError> {
        sqlx::query_as::<_, Shop>(
            "UPDATE shops SET name=$1, display_name=$2, phone=$3, address=$4, default_report_mode=$5, default_report_tone=$6, default_include_maint=$7 WHERE id=$8 RETURNING *"
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
