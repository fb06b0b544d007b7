use crate::domain::{models::{shop::Shop, user::User}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, shop_id, email, password_hash, display_name, role, oauth_provider, oauth_sub, email_verified_at, created_at";

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create_with_shop(&self, shop: &Shop, user: &User) -> Result<(Shop, User), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created_shop = sqlx::query_as::<_, Shop>(
            "INSERT INTO shops (id, name, display_name, phone, address, default_report_mode, default_report_tone, default_include_maint, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&shop.id)
            .bind(&shop.name)
            .bind(&shop.display_name)
            .bind(&shop.phone)
            .bind(&shop.address)
            .bind(&shop.default_report_mode)
            .bind(&shop.default_report_tone)
            .bind(shop.default_include_maint)
            .bind(shop.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let created_user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
            .bind(&user.id)
            .bind(&created_shop.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.display_name)
            .bind(&user.role)
            .bind(&user.oauth_provider)
            .bind(&user.oauth_sub)
            .bind(user.email_verified_at)
            .bind(user.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok((created_shop, created_user))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_oauth_sub(&self, provider: &str, sub: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE oauth_provider = ? AND oauth_sub = ?"))
            .bind(provider)
            .bind(sub)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_display_name(&self, id: &str, display_name: Option<&str>) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("UPDATE users SET display_name = ? WHERE id = ? RETURNING {USER_COLUMNS}"))
            .bind(display_name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
