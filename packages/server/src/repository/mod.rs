//! Case study persistence.
//!
//! [`CaseStudyRepository`] picks a [`CaseStudyStore`] on every call: the database
//! when the connection probe reports it available, the JSON file otherwise. It
//! also owns the lifecycle of uploaded images referenced by `image_url`.

mod database;
mod file;
mod store;

use std::sync::Arc;

use common::storage::{AttachmentRef, AttachmentStore, StorageError};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use database::DatabaseCaseStudyStore;
pub use file::FileCaseStudyStore;
pub use store::{Backend, CaseStudyStore, StoreError};

use crate::connection::ConnectionProbe;
use crate::models::case_study::{CaseStudy, CaseStudyInput};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Attachment error: {0}")]
    Attachment(#[from] StorageError),
}

/// An uploaded file waiting to be stored.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub data: Vec<u8>,
}

#[derive(Clone)]
pub struct CaseStudyRepository {
    probe: Arc<dyn ConnectionProbe>,
    file_store: Arc<FileCaseStudyStore>,
    attachments: Arc<dyn AttachmentStore>,
}

impl CaseStudyRepository {
    pub fn new(
        probe: Arc<dyn ConnectionProbe>,
        file_store: Arc<FileCaseStudyStore>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            probe,
            file_store,
            attachments,
        }
    }

    /// Choose the store for one operation. Called exactly once per operation.
    pub fn store(&self) -> Arc<dyn CaseStudyStore> {
        match self.probe.connection() {
            Some(db) => Arc::new(DatabaseCaseStudyStore::new(db)),
            None => self.file_store.clone(),
        }
    }

    pub fn attachments(&self) -> &Arc<dyn AttachmentStore> {
        &self.attachments
    }

    pub async fn list(&self) -> Result<Vec<CaseStudy>, RepositoryError> {
        let store = self.store();
        let records = store.list().await?;
        debug!(backend = store.backend().as_str(), count = records.len(), "Listed case studies");
        Ok(records)
    }

    pub async fn create(
        &self,
        input: CaseStudyInput,
        image: Option<Upload>,
    ) -> Result<CaseStudy, RepositoryError> {
        let fields = input.validate().map_err(RepositoryError::Validation)?;
        let store = self.store();

        let image_url = match image {
            Some(upload) => Some(self.store_attachment(upload).await?),
            None => None,
        };

        let record = match store.insert(fields, image_url.clone()).await {
            Ok(record) => record,
            Err(err) => {
                if let Some(url) = image_url {
                    self.discard_attachment(&url).await;
                }
                return Err(err.into());
            }
        };

        info!(
            id = %record.id,
            backend = store.backend().as_str(),
            "Created case study"
        );
        Ok(record)
    }

    pub async fn update(
        &self,
        id: &str,
        input: CaseStudyInput,
        image: Option<Upload>,
    ) -> Result<CaseStudy, RepositoryError> {
        let fields = input.validate().map_err(RepositoryError::Validation)?;
        let store = self.store();

        let existing = store.find(id).await?.ok_or_else(|| not_found(id))?;

        let (image_url, replaced) = match image {
            Some(upload) => (Some(self.store_attachment(upload).await?), true),
            None => (existing.image_url.clone(), false),
        };

        let updated = match store.replace(id, fields, image_url.clone()).await {
            Ok(Some(updated)) => updated,
            outcome => {
                // The fresh upload is not referenced by anything.
                if replaced && let Some(url) = &image_url {
                    self.discard_attachment(url).await;
                }
                return Err(match outcome {
                    Err(err) => err.into(),
                    Ok(_) => not_found(id),
                });
            }
        };

        if replaced && let Some(old_url) = existing.image_url {
            self.discard_attachment(&old_url).await;
        }

        info!(id, backend = store.backend().as_str(), "Updated case study");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let store = self.store();
        let removed = store.remove(id).await?.ok_or_else(|| not_found(id))?;

        if let Some(url) = removed.image_url {
            self.discard_attachment(&url).await;
        }

        info!(id, backend = store.backend().as_str(), "Deleted case study");
        Ok(())
    }

    async fn store_attachment(&self, upload: Upload) -> Result<String, RepositoryError> {
        let reference = self
            .attachments
            .put(&upload.file_name, &upload.data)
            .await?;
        Ok(reference.url())
    }

    /// Best-effort removal of a stored image. Failures are logged, never returned.
    async fn discard_attachment(&self, url: &str) {
        let reference = match AttachmentRef::from_url(url) {
            Ok(reference) => reference,
            Err(err) => {
                debug!(url, error = %err, "Image is not in the attachment store, skipping delete");
                return;
            }
        };

        match self.attachments.delete(&reference).await {
            Ok(true) => debug!(file = %reference, "Deleted attachment"),
            Ok(false) => warn!(file = %reference, "Attachment already missing"),
            Err(err) => warn!(file = %reference, error = %err, "Failed to delete attachment"),
        }
    }
}

fn not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound(format!("Case study '{id}' not found"))
}
