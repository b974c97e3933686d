use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::AppError;
use crate::models::catalog::{Device, Service, Slide, parse_device_id};
use crate::state::AppState;

pub async fn list_devices(State(state): State<AppState>) -> Json<Vec<Device>> {
    Json(state.catalog.devices.clone())
}

#[instrument(skip(state))]
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Device>, AppError> {
    parse_device_id(&id)
        .and_then(|id| state.catalog.device(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Device not found".into()))
}

#[instrument(skip(state))]
pub async fn devices_by_type(
    State(state): State<AppState>,
    Path(device_type): Path<String>,
) -> Result<Json<Vec<Device>>, AppError> {
    let devices = state.catalog.devices_of_type(&device_type);
    if devices.is_empty() {
        return Err(AppError::NotFound("No devices found for this type".into()));
    }
    Ok(Json(devices))
}

pub async fn devices_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Json<Vec<Device>> {
    Json(state.catalog.devices_with_status(&status))
}

pub async fn list_slides(State(state): State<AppState>) -> Json<Vec<Slide>> {
    Json(state.catalog.slides.clone())
}

pub async fn list_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.catalog.services.clone())
}
