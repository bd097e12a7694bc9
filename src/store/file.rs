//! Implements the `Store` trait with one JSON file per key in a data directory.

use crate::store::Store;
use crate::{utils, Result};
use anyhow::ensure;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A `Store` that keeps each key in its own file, `<dir>/<key>.json`. Writes go to a temporary
/// file first and are then renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a `FileStore` in `dir`, creating the directory if it does not exist.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds `key`.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        ensure!(
            !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c)),
            "Invalid storage key '{key}'"
        );
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl Store for FileStore {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        trace!("get {key} from {}", path.display());
        utils::read_optional(&path).await
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("set {key} in {}", path.display());
        utils::write_atomic(&path, value).await
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        utils::remove(&path).await
    }
}
