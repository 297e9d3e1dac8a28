pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::services::{
    device_service::DeviceService, oauth_service::OAuthService, user_service::UserService,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub user_service: UserService,
    pub device_service: DeviceService,
    pub oauth_service: OAuthService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let user_service = UserService::new(pool.clone());
        let device_service = DeviceService::new(pool.clone());
        let oauth_service = OAuthService::new(config);

        Self {
            pool,
            user_service,
            device_service,
            oauth_service,
        }
    }
}
