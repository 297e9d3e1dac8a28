use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite:chffr.sqlite";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub google_client_id: String,
    pub github_client_id: String,
    /// Origin used for OAuth `redirect_uri` instead of the request's Host header.
    pub public_base_url: Option<String>,
    /// Believe `X-Forwarded-Proto`/`X-Forwarded-Host`. Only set behind a proxy
    /// that overwrites them.
    pub trust_forwarded_headers: bool,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            database_url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            google_client_id: get_env_or("GOOGLE_CLIENT_ID", ""),
            github_client_id: get_env_or("GITHUB_CLIENT_ID", ""),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            trust_forwarded_headers: get_env_parse_or("TRUST_FORWARDED_HEADERS", false)?,
            log_json: get_env_parse_or("LOG_JSON", false)?,
        })
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
