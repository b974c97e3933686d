mod error;
mod reference;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use reference::{AttachmentRef, UPLOADS_PREFIX, unique_filename};
pub use traits::{AttachmentStore, BoxReader};
