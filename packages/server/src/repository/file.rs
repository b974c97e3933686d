use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use uuid::Uuid;

use super::store::{Backend, CaseStudyStore, StoreError, sort_newest_first};
use crate::models::case_study::{CaseStudy, CaseStudyFields};

/// On-disk layout of the snapshot file.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    case_studies: Vec<CaseStudy>,
}

/// Case studies kept in a single JSON file.
///
/// Every write loads the whole snapshot, changes it in memory, and atomically
/// replaces the file. Writers are not serialized: two concurrent writes may
/// both start from the same snapshot, and the last rename wins.
pub struct FileCaseStudyStore {
    path: PathBuf,
}

impl FileCaseStudyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<CaseStudy>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        Ok(snapshot.case_studies)
    }

    async fn persist(&self, case_studies: Vec<CaseStudy>) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&Snapshot { case_studies })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).await?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "casestudies.json".into());
        let temp_path = dir.join(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

        if let Err(e) = fs::write(&temp_path, &data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl CaseStudyStore for FileCaseStudyStore {
    fn backend(&self) -> Backend {
        Backend::File
    }

    async fn list(&self) -> Result<Vec<CaseStudy>, StoreError> {
        let mut records = self.load().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn find(&self, id: &str) -> Result<Option<CaseStudy>, StoreError> {
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    async fn insert(
        &self,
        fields: CaseStudyFields,
        image_url: Option<String>,
    ) -> Result<CaseStudy, StoreError> {
        let mut records = self.load().await?;

        let now = Utc::now();
        let record = CaseStudy {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            description: fields.description,
            industry: fields.industry,
            image_url,
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());

        self.persist(records).await?;
        Ok(record)
    }

    async fn replace(
        &self,
        id: &str,
        fields: CaseStudyFields,
        image_url: Option<String>,
    ) -> Result<Option<CaseStudy>, StoreError> {
        let mut records = self.load().await?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.title = fields.title;
        record.description = fields.description;
        record.industry = fields.industry;
        record.image_url = image_url;
        record.updated_at = Utc::now().max(record.created_at);
        let updated = record.clone();

        self.persist(records).await?;
        Ok(Some(updated))
    }

    async fn remove(&self, id: &str) -> Result<Option<CaseStudy>, StoreError> {
        let mut records = self.load().await?;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        let removed = records.remove(index);

        self.persist(records).await?;
        Ok(Some(removed))
    }
}
