use serde::Serialize;

/// Service liveness and current persistence backend.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    /// Database connection state: `connected`, `connecting`, `disconnected`, or `error`.
    #[schema(example = "connected")]
    pub database: &'static str,
    /// Backend case study requests are currently served from: `database` or `file`.
    #[schema(example = "database")]
    pub backend: &'static str,
}
