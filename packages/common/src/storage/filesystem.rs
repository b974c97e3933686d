use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

use super::error::StorageError;
use super::reference::{AttachmentRef, unique_filename};
use super::traits::{AttachmentStore, BoxReader};

/// Filesystem-backed attachment store.
///
/// Files live flat in `{base_path}/{generated filename}`; in-flight writes go to
/// `{base_path}/.tmp` and are renamed into place once complete.
pub struct FilesystemAttachmentStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemAttachmentStore {
    /// Create a new filesystem attachment store.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Accept only uploads that look like images, judged by the original name.
    fn check_media_type(original_name: &str) -> Result<(), StorageError> {
        match mime_guess::from_path(original_name).first() {
            Some(mime) if mime.type_() == mime_guess::mime::IMAGE => Ok(()),
            Some(mime) => Err(StorageError::UnsupportedType(mime.to_string())),
            None => Err(StorageError::UnsupportedType(original_name.to_string())),
        }
    }

    fn file_path(&self, reference: &AttachmentRef) -> PathBuf {
        self.base_path.join(reference.filename())
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl AttachmentStore for FilesystemAttachmentStore {
    async fn put(&self, original_name: &str, data: &[u8]) -> Result<AttachmentRef, StorageError> {
        Self::check_media_type(original_name)?;
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let reference = AttachmentRef::from_filename(&unique_filename(original_name))?;
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, self.file_path(&reference)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(file = %reference, size = data.len(), "Stored attachment");
        Ok(reference)
    }

    async fn put_stream(
        &self,
        original_name: &str,
        mut reader: BoxReader,
    ) -> Result<AttachmentRef, StorageError> {
        Self::check_media_type(original_name)?;

        let temp_path = self.temp_path();
        let mut total_bytes: u64 = 0;
        let mut buf = vec![0u8; 64 * 1024];
        let mut temp_file = fs::File::create(&temp_path).await?;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            tokio::io::AsyncWriteExt::write_all(&mut temp_file, &buf[..n]).await?;
        }

        tokio::io::AsyncWriteExt::flush(&mut temp_file).await?;
        drop(temp_file);

        let reference = AttachmentRef::from_filename(&unique_filename(original_name))?;
        if let Err(e) = fs::rename(&temp_path, self.file_path(&reference)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(file = %reference, size = total_bytes, "Stored attachment");
        Ok(reference)
    }

    async fn get_stream(&self, reference: &AttachmentRef) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.file_path(reference)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(reference.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, reference: &AttachmentRef) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.file_path(reference)).await?)
    }

    async fn delete(&self, reference: &AttachmentRef) -> Result<bool, StorageError> {
        match fs::remove_file(self.file_path(reference)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
