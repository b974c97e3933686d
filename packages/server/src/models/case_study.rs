use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::case_study;

/// A written account of a project or engagement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    /// Backend-assigned identifier.
    #[schema(example = "0192f4a1-7c3e-7b21-9d55-3f2a1c0e8b44")]
    pub id: String,
    #[schema(example = "Acme Rollout")]
    pub title: String,
    #[schema(example = "Deployed 500 sensors across 3 sites")]
    pub description: String,
    #[schema(example = "Manufacturing")]
    pub industry: String,
    /// Public path of the attached image, absent when there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "/uploads/acme-1729241234567-3141592653.png")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<case_study::Model> for CaseStudy {
    fn from(m: case_study::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            industry: m.industry,
            image_url: m.image_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Raw, unvalidated case study fields as submitted by a client.
#[derive(Debug, Default, Clone)]
pub struct CaseStudyInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
}

/// Case study fields that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseStudyFields {
    pub title: String,
    pub description: String,
    pub industry: String,
}

pub const TITLE_LEN: (usize, usize) = (2, 120);
pub const DESCRIPTION_LEN: (usize, usize) = (10, 5000);
pub const INDUSTRY_LEN: (usize, usize) = (2, 120);

impl CaseStudyInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            industry: Some(industry.into()),
        }
    }

    /// Check every field, reporting the first violation.
    pub fn validate(&self) -> Result<CaseStudyFields, String> {
        Ok(CaseStudyFields {
            title: validate_text("Title", self.title.as_deref(), TITLE_LEN)?,
            description: validate_text("Description", self.description.as_deref(), DESCRIPTION_LEN)?,
            industry: validate_text("Industry", self.industry.as_deref(), INDUSTRY_LEN)?,
        })
    }
}

/// Validate a required text field by its trimmed Unicode length.
fn validate_text(
    name: &str,
    value: Option<&str>,
    (min, max): (usize, usize),
) -> Result<String, String> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(format!("{name} is required"));
    }
    let len = value.chars().count();
    if len < min || len > max {
        return Err(format!("{name} must be {min}-{max} characters"));
    }
    Ok(value.to_string())
}

/// Body returned by a successful delete.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    #[schema(example = true)]
    pub success: bool,
}
