use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};

use crate::error::AppError;
use crate::models::case_study::CaseStudyInput;
use crate::repository::Upload;
use crate::state::AppState;

/// Multipart case study submission: `title`, `description`, `industry`, and an
/// optional `image` file.
///
/// Malformed bodies become `AppError::Validation`. A file part with no name and
/// no content (an empty file input) counts as no image.
pub struct CaseStudyForm {
    pub input: CaseStudyInput,
    pub image: Option<Upload>,
}

impl FromRequest<AppState> for CaseStudyForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let max_size = state.config.storage.max_upload_size;

        let mut input = CaseStudyInput::default();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            match field.name() {
                Some("title") => input.title = Some(read_text(field).await?),
                Some("description") => input.description = Some(read_text(field).await?),
                Some("industry") => input.industry = Some(read_text(field).await?),
                Some("image") => image = read_file(field, max_size).await?,
                _ => {} // Ignore unknown fields.
            }
        }

        Ok(CaseStudyForm { input, image })
    }
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))
}

async fn read_file(mut field: Field<'_>, max_size: u64) -> Result<Option<Upload>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let mut data = Vec::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        if (data.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::Validation(format!(
                "Image exceeds maximum size of {max_size} bytes"
            )));
        }
        data.extend_from_slice(&chunk);
    }

    if file_name.trim().is_empty() {
        if data.is_empty() {
            return Ok(None);
        }
        return Err(AppError::Validation("Image must have a filename".into()));
    }

    Ok(Some(Upload { file_name, data }))
}
