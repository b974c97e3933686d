use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemAttachmentStore;

use crate::config::AppConfig;
use crate::connection::ConnectionProbe;
use crate::models::catalog::Catalog;
use crate::repository::{CaseStudyRepository, FileCaseStudyStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub connection: Arc<dyn ConnectionProbe>,
    pub case_studies: CaseStudyRepository,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Wire the stores described by `config` around an existing connection probe.
    pub async fn init(
        config: AppConfig,
        connection: Arc<dyn ConnectionProbe>,
    ) -> anyhow::Result<Self> {
        let attachments = FilesystemAttachmentStore::new(
            config.storage.uploads_dir.clone(),
            config.storage.max_upload_size,
        )
        .await
        .with_context(|| {
            format!(
                "Failed to prepare uploads directory {}",
                config.storage.uploads_dir.display()
            )
        })?;
        let file_store = FileCaseStudyStore::new(config.storage.data_file.clone());
        let catalog = Catalog::load().context("Bundled catalog is malformed")?;

        let case_studies = CaseStudyRepository::new(
            connection.clone(),
            Arc::new(file_store),
            Arc::new(attachments),
        );

        Ok(Self {
            config,
            connection,
            case_studies,
            catalog: Arc::new(catalog),
        })
    }
}
