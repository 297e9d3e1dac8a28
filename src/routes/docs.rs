use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    dto::oauth_dto::CallbackResponse,
    models::{device::Device, user::User},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health,
        super::me::get_me,
        super::me::get_my_devices,
        super::device::get_device,
        super::oauth::login,
        super::oauth::callback,
    ),
    components(schemas(User, Device, CallbackResponse)),
    modifiers(&BearerAuth),
    tags((name = "chffr", description = "Device and user records"))
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by the protected routes. The
/// token is a plain user id.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
