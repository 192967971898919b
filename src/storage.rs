use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key `{0}`")]
    InvalidKey(String),
    #[error("failed to store object at `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Keyed blob storage for product imagery. Returns the public URL the
/// stored object is reachable under.
pub trait ImageStore {
    fn save_image(&self, source: &Path, key: &str) -> StorageResult<String>;
}

/// Stores uploads under a local directory that the server exposes as
/// static files.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_base: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    fn check_key(key: &str) -> StorageResult<()> {
        let suspicious = key.is_empty()
            || key.starts_with('/')
            || key.contains('\\')
            || key.split('/').any(|segment| segment.is_empty() || segment == "..");
        if suspicious {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl ImageStore for LocalImageStore {
    fn save_image(&self, source: &Path, key: &str) -> StorageResult<String> {
        Self::check_key(key)?;
        let target = self.root.join(key);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })?;
        }
        fs::copy(source, &target).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        Ok(format!(
            "{}/{key}",
            self.public_base.trim_end_matches('/')
        ))
    }
}

/// Upload name derived from the browser-supplied one: prefixed with the
/// current timestamp in milliseconds, whitespace runs collapsed to a
/// single underscore, path separators stripped.
pub fn safe_file_name(original: Option<&str>) -> String {
    let base = original
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("upload");

    let mut cleaned = String::with_capacity(base.len());
    let mut in_whitespace = false;
    for ch in base.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                cleaned.push('_');
            }
            in_whitespace = true;
        } else {
            cleaned.push(ch);
            in_whitespace = false;
        }
    }

    format!("{}-{cleaned}", chrono::Utc::now().timestamp_millis())
}
