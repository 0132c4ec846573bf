//! The save/load boundary between a flow editor and wherever flows are kept.

use crate::error::PersistenceError;
use crate::flow::FlowSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Stores and retrieves a single flow snapshot.
pub trait FlowRepository: Send + Sync {
    fn save(&self, snapshot: &FlowSnapshot) -> Result<(), PersistenceError>;

    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<FlowSnapshot>, PersistenceError>;
}

/// Keeps the flow as a JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl FlowRepository for JsonFileRepository {
    fn save(&self, snapshot: &FlowSnapshot) -> Result<(), PersistenceError> {
        let json = snapshot.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        info!(path = %self.path.display(), nodes = snapshot.nodes.len(), "flow saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<FlowSnapshot>, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let snapshot = FlowSnapshot::from_json(&json)?;
        info!(path = %self.path.display(), nodes = snapshot.nodes.len(), "flow loaded");
        Ok(Some(snapshot))
    }
}

/// Holds the last saved snapshot in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    slot: Mutex<Option<FlowSnapshot>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlowRepository for InMemoryRepository {
    fn save(&self, snapshot: &FlowSnapshot) -> Result<(), PersistenceError> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<FlowSnapshot>, PersistenceError> {
        let slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(slot.clone())
    }
}
