use crate::error::Result;
use crate::models::user::{CreateUser, User};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Not reached by any route yet; kept for linking OAuth logins to accounts.
    pub async fn find_by_provider(&self, provider: &str, provider_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE provider = ? AND provider_id = ?",
        )
        .bind(provider)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(&self, user: CreateUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, provider, provider_id, name)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.provider)
        .bind(&user.provider_id)
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = created.id, provider = %created.provider, "user created");
        Ok(created)
    }
}
