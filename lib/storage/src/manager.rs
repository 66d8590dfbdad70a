use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use vibematch_core::{Error, MatchLogStore, ProfileStore, Result};
use crate::lmdb_storage::LmdbStorage;
use crate::memory::MemoryStorage;

enum Backend {
    Memory(Arc<MemoryStorage>),
    Lmdb(Arc<LmdbStorage>),
}

/// Owns the configured backend and hands out the store handles
/// that get injected into the matching engine.
pub struct StorageManager {
    backend: Backend,
    data_dir: Option<PathBuf>,
}

impl StorageManager {
    /// Durable storage under `data_dir/lmdb`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let lmdb = LmdbStorage::new(data_dir.join("lmdb"))
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(Self {
            backend: Backend::Lmdb(Arc::new(lmdb)),
            data_dir: Some(data_dir),
        })
    }

    /// Non-durable storage; everything is lost on shutdown
    pub fn in_memory() -> Self {
        info!("Using in-memory storage");
        Self {
            backend: Backend::Memory(Arc::new(MemoryStorage::new())),
            data_dir: None,
        }
    }

    pub fn profiles(&self) -> Arc<dyn ProfileStore> {
        match &self.backend {
            Backend::Memory(s) => s.clone(),
            Backend::Lmdb(s) => s.clone(),
        }
    }

    pub fn match_log(&self) -> Arc<dyn MatchLogStore> {
        match &self.backend {
            Backend::Memory(s) => s.clone(),
            Backend::Lmdb(s) => s.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    #[inline]
    pub fn is_durable(&self) -> bool {
        matches!(self.backend, Backend::Lmdb(_))
    }

    /// Number of directional match-log entries
    pub fn match_log_len(&self) -> Result<u64> {
        match &self.backend {
            Backend::Memory(s) => Ok(s.match_log_len() as u64),
            Backend::Lmdb(s) => s.match_log_len().map_err(|e| Error::Storage(e.to_string())),
        }
    }
}
