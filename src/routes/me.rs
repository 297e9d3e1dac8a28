use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Json},
};

use crate::{
    error::Result,
    models::user::User,
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/me",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The authenticated user", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn get_me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    get,
    path = "/v1/me/devices",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Devices owned by the authenticated user", body = [crate::models::device::Device]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_my_devices(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    let devices = state.device_service.find_by_user_id(user.id).await?;
    Ok(Json(devices))
}
