use crate::error::Result;
use crate::models::device::{CreateDevice, Device};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct DeviceService {
    pool: SqlitePool,
}

impl DeviceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(device)
    }

    pub async fn find_by_dongle_id(&self, dongle_id: &str) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE dongle_id = ?")
            .bind(dongle_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(device)
    }

    /// Devices owned by `user_id`, oldest first.
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Device>> {
        let devices = sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE user_id = ? ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(devices)
    }

    pub async fn create(&self, device: CreateDevice) -> Result<Device> {
        let created = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (dongle_id, user_id, name)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&device.dongle_id)
        .bind(device.user_id)
        .bind(&device.name)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            device_id = created.id,
            dongle_id = %created.dongle_id,
            user_id = created.user_id,
            "device created"
        );
        Ok(created)
    }
}
