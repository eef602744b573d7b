//! Object storage for catalog images.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("failed to write object: {0}")]
    Io(#[from] std::io::Error),
}

/// Location of a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Key inside the store.
    pub path: String,
    /// URL under which the object is publicly reachable.
    pub public_url: String,
}

/// Flat key/value store for binary objects. Writing an existing key replaces it.
pub trait ObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<StoredObject, StorageError>;
}

/// Stores objects as files in one directory that the server exposes under
/// `public_base_url`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_base_url)
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl ObjectStore for LocalObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<StoredObject, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(key), bytes)?;

        Ok(StoredObject {
            path: key.to_string(),
            public_url: format!("{}/{}", self.public_base_url, key),
        })
    }
}

/// Lowercase, ascii-alphanumeric words joined by `-`.
pub fn slugify(value: &str) -> String {
    value
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Extension of `file_name` if it is short and alphanumeric, else `jpg`.
pub fn extension_or_default(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| "jpg".to_string())
}
