use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::error::{Result, ScheduleError};
use crate::store::{self, ScheduleStore};

/// Loaded stores keyed by source path, reused while the source checksum is unchanged.
#[derive(Debug, Default)]
pub struct StoreCache {
    entries: HashMap<PathBuf, Arc<ScheduleStore>>,
}

impl StoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached store for `path`, re-parsing only when the file content changed.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ScheduleStore>> {
        let bytes = std::fs::read(path).map_err(|source| ScheduleError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let checksum = store::calculate_checksum(&bytes);

        if let Some(cached) = self.entries.get(path) {
            if cached.checksum() == checksum {
                debug!("schedule cache hit for {}", path.display());
                return Ok(Arc::clone(cached));
            }
            debug!("schedule source {} changed, reloading", path.display());
        }

        let loaded = Arc::new(store::parse_bytes(&bytes)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
