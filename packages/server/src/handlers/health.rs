use axum::Json;
use axum::extract::State;

use crate::connection::ConnectionProbe;
use crate::models::health::HealthResponse;
use crate::repository::Backend;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Service health",
    description = "Reports database connectivity and which backend case study requests \
        are currently served from.",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = if state.connection.is_backend_available() {
        Backend::Database
    } else {
        Backend::File
    };

    Json(HealthResponse {
        status: "ok",
        database: state.connection.state_label(),
        backend: backend.as_str(),
    })
}
