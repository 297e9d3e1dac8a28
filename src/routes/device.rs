use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1.1/devices/{dongle_id}",
    params(
        ("dongle_id" = String, Path, description = "Hardware dongle identifier")
    ),
    responses(
        (status = 200, description = "Device found", body = crate::models::device::Device),
        (status = 404, description = "Device not found")
    )
)]
#[axum::debug_handler]
pub async fn get_device(
    State(state): State<AppState>,
    Path(dongle_id): Path<String>,
) -> Result<impl IntoResponse> {
    let device = state
        .device_service
        .find_by_dongle_id(&dongle_id)
        .await?
        .ok_or_else(|| Error::NotFound("Device not found".to_string()))?;
    Ok(Json(device))
}
