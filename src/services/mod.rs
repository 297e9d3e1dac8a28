pub mod device_service;
pub mod oauth_service;
pub mod user_service;
