use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::reference::AttachmentRef;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Storage for uploaded attachments, addressed by generated filename.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store bytes under a name derived from `original_name`.
    async fn put(&self, original_name: &str, data: &[u8]) -> Result<AttachmentRef, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(original_name, reader).await
    }

    /// Store data from an async reader under a name derived from `original_name`.
    async fn put_stream(
        &self,
        original_name: &str,
        reader: BoxReader,
    ) -> Result<AttachmentRef, StorageError>;

    /// Retrieve all bytes of an attachment.
    async fn get(&self, reference: &AttachmentRef) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(reference).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve an attachment as a streaming async reader.
    async fn get_stream(&self, reference: &AttachmentRef) -> Result<BoxReader, StorageError>;

    /// Check whether an attachment exists.
    async fn exists(&self, reference: &AttachmentRef) -> Result<bool, StorageError>;

    /// Delete an attachment.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, reference: &AttachmentRef) -> Result<bool, StorageError>;
}
