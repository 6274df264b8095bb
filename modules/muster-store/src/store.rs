//! Registry persistence. The whole document is the unit of persistence:
//! callers load the full registry, mutate it in memory, and save it back.
//! Saves are atomic from the caller's perspective; cross-process atomicity
//! is out of scope.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use muster_common::Registry;

use crate::error::Result;

/// Pluggable backing store for the registry document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the full registry. A store with no document yet returns an
    /// empty registry (first boot).
    async fn load(&self) -> Result<Registry>;

    /// Replace the full registry.
    async fn save(&self, registry: &Registry) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// One JSON file on disk. Writes go to a sibling temp file first and are
/// renamed into place, so a reader sees either the old or the new document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Registry> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No document yet, starting empty");
                return Ok(Registry::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, registry: &Registry) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(registry)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Registry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Registry> {
        Ok(self.inner.lock().expect("store lock poisoned").clone())
    }

    async fn save(&self, registry: &Registry) -> Result<()> {
        *self.inner.lock().expect("store lock poisoned") = registry.clone();
        Ok(())
    }
}
