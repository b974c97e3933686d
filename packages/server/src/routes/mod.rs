use axum::routing::get;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(case_study_routes(config))
        .merge(catalog_routes())
        .routes(routes!(handlers::health::health))
}

fn case_study_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::case_study::list_case_studies,
            handlers::case_study::create_case_study
        ))
        .routes(routes!(
            handlers::case_study::update_case_study,
            handlers::case_study::delete_case_study
        ))
        .layer(handlers::case_study::case_study_body_limit(
            config.storage.max_upload_size,
        ))
}

fn catalog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .route("/devices", get(handlers::catalog::list_devices))
        .route("/devices/{id}", get(handlers::catalog::get_device))
        .route(
            "/devices/type/{device_type}",
            get(handlers::catalog::devices_by_type),
        )
        .route("/status/{status}", get(handlers::catalog::devices_by_status))
        .route("/slides", get(handlers::catalog::list_slides))
        .route("/services", get(handlers::catalog::list_services))
}
