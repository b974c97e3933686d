use axum::Json;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::case_study_form::CaseStudyForm;
use crate::models::case_study::{CaseStudy, DeleteResponse};
use crate::state::AppState;

/// Body limit for case study submissions: the image plus a little room for the
/// text fields and multipart framing.
pub fn case_study_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    let limit = max_upload_size.saturating_add(64 * 1024);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    get,
    path = "/casestudies",
    tag = "Case Studies",
    operation_id = "listCaseStudies",
    summary = "List case studies",
    description = "Returns every case study, newest first, from whichever backend is \
        currently active.",
    responses(
        (status = 200, description = "Case studies", body = Vec<CaseStudy>),
        (status = 500, description = "Backend failure (server_error)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_case_studies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseStudy>>, AppError> {
    Ok(Json(state.case_studies.list().await?))
}

#[utoipa::path(
    post,
    path = "/casestudies",
    tag = "Case Studies",
    operation_id = "createCaseStudy",
    summary = "Create a case study",
    description = "Creates a case study from multipart fields `title`, `description`, \
        `industry`, and an optional `image` file.",
    request_body(content_type = "multipart/form-data", description = "Case study fields with optional image"),
    responses(
        (status = 201, description = "Case study created", body = CaseStudy),
        (status = 400, description = "Validation error (validation_error)", body = ErrorBody),
        (status = 500, description = "Backend failure (server_error)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn create_case_study(
    State(state): State<AppState>,
    form: CaseStudyForm,
) -> Result<impl IntoResponse, AppError> {
    let record = state.case_studies.create(form.input, form.image).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    put,
    path = "/casestudies/{id}",
    tag = "Case Studies",
    operation_id = "updateCaseStudy",
    summary = "Replace a case study",
    description = "Replaces title, description, and industry. A new `image` replaces and \
        deletes the previous one; without it the current image is kept.",
    params(("id" = String, Path, description = "Case study ID")),
    request_body(content_type = "multipart/form-data", description = "Case study fields with optional image"),
    responses(
        (status = 200, description = "Case study updated", body = CaseStudy),
        (status = 400, description = "Validation error (validation_error)", body = ErrorBody),
        (status = 404, description = "Case study not found (not_found)", body = ErrorBody),
        (status = 500, description = "Backend failure (server_error)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn update_case_study(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: CaseStudyForm,
) -> Result<Json<CaseStudy>, AppError> {
    let record = state.case_studies.update(&id, form.input, form.image).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/casestudies/{id}",
    tag = "Case Studies",
    operation_id = "deleteCaseStudy",
    summary = "Delete a case study",
    description = "Deletes the case study and its image, if any.",
    params(("id" = String, Path, description = "Case study ID")),
    responses(
        (status = 200, description = "Case study deleted", body = DeleteResponse),
        (status = 404, description = "Case study not found (not_found)", body = ErrorBody),
        (status = 500, description = "Backend failure (server_error)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_case_study(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.case_studies.delete(&id).await?;
    Ok(Json(DeleteResponse { success: true }))
}
