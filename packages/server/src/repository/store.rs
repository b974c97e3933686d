use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::case_study::{CaseStudy, CaseStudyFields};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("File store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File store is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Which storage mechanism served a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Database,
    File,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Database => "database",
            Backend::File => "file",
        }
    }
}

/// Storage capability for case study records.
///
/// Implementations own identity and timestamps; callers pass validated fields.
#[async_trait]
pub trait CaseStudyStore: Send + Sync {
    fn backend(&self) -> Backend;

    /// All records, newest `created_at` first.
    async fn list(&self) -> Result<Vec<CaseStudy>, StoreError>;

    async fn find(&self, id: &str) -> Result<Option<CaseStudy>, StoreError>;

    async fn insert(
        &self,
        fields: CaseStudyFields,
        image_url: Option<String>,
    ) -> Result<CaseStudy, StoreError>;

    /// Replace the fields of an existing record and bump `updated_at`.
    ///
    /// Returns `None` when no record has this id.
    async fn replace(
        &self,
        id: &str,
        fields: CaseStudyFields,
        image_url: Option<String>,
    ) -> Result<Option<CaseStudy>, StoreError>;

    /// Remove a record, returning it if it existed.
    async fn remove(&self, id: &str) -> Result<Option<CaseStudy>, StoreError>;
}

/// Sort newest first, the order every backend must return.
pub(crate) fn sort_newest_first(records: &mut [CaseStudy]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
