use std::fmt;

/// Errors that can occur during attachment storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The requested attachment was not found.
    NotFound(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The reference does not point into the attachment store.
    InvalidReference(String),
    /// The attachment exceeds the configured size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// The upload is not an accepted media type.
    UnsupportedType(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "attachment not found: {name}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::InvalidReference(msg) => write!(f, "invalid attachment reference: {msg}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "attachment exceeds size limit ({actual} > {limit} bytes)")
            }
            Self::UnsupportedType(kind) => {
                write!(f, "unsupported attachment type '{kind}': only images are accepted")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
