use std::fmt;

use chrono::Utc;

use super::error::StorageError;

/// URL prefix under which stored attachments are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

const MAX_STEM_LEN: usize = 64;
const MAX_EXTENSION_LEN: usize = 16;

/// A reference to a stored attachment, identified by its generated filename.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    /// Wrap a stored filename, rejecting anything that is not a flat, safe name.
    pub fn from_filename(filename: &str) -> Result<Self, StorageError> {
        validate_stored_filename(filename)?;
        Ok(Self(filename.to_string()))
    }

    /// Parse a public URL of the form `/uploads/<filename>`.
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let filename = url.strip_prefix(UPLOADS_PREFIX).ok_or_else(|| {
            StorageError::InvalidReference(format!("'{url}' is not under {UPLOADS_PREFIX}"))
        })?;
        Self::from_filename(filename)
    }

    pub fn filename(&self) -> &str {
        &self.0
    }

    /// Public URL the attachment is served from.
    pub fn url(&self) -> String {
        format!("{UPLOADS_PREFIX}{}", self.0)
    }
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a collision-resistant filename from an uploaded file's original name.
///
/// Every character that is not ASCII alphanumeric is stripped from the stem and
/// the extension, so the result can never contain separators or `..`.
pub fn unique_filename(original_name: &str) -> String {
    let (stem, extension) = split_extension(original_name);

    let mut stem: String = stem.chars().filter(char::is_ascii_alphanumeric).collect();
    stem.truncate(MAX_STEM_LEN);
    if stem.is_empty() {
        stem.push_str("file");
    }

    let suffix = format!("{}-{}", Utc::now().timestamp_millis(), rand::random::<u32>());

    let extension: String = extension
        .map(|ext| {
            ext.chars()
                .filter(char::is_ascii_alphanumeric)
                .take(MAX_EXTENSION_LEN)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .unwrap_or_default();

    if extension.is_empty() {
        format!("{stem}-{suffix}")
    } else {
        format!("{stem}-{suffix}.{extension}")
    }
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    // Browsers on Windows may send the full client path.
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

fn validate_stored_filename(filename: &str) -> Result<(), StorageError> {
    let invalid = |reason: &str| Err(StorageError::InvalidReference(reason.to_string()));

    if filename.is_empty() {
        return invalid("filename cannot be empty");
    }
    if filename.starts_with('.') {
        return invalid("hidden files are not allowed");
    }
    if !filename
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'))
    {
        return invalid("filename contains invalid characters");
    }
    Ok(())
}
