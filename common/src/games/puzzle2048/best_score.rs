use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{ConfigManager, FileContentConfigProvider, Validate};
use crate::log;

/// Cross-session best score. Implementations never fail towards the caller:
/// an unreadable store reads as 0 and a failed write is dropped.
pub trait BestScoreStore {
    fn read(&self) -> u64;
    fn write(&self, value: u64);
}

#[derive(Default)]
pub struct MemoryBestScoreStore {
    value: AtomicU64,
}

impl MemoryBestScoreStore {
    pub fn new(value: u64) -> Self {
        Self {
            value: AtomicU64::new(value),
        }
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn read(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    fn write(&self, value: u64) {
        self.value.store(value, Ordering::Relaxed);
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Default)]
pub struct BestScoreRecord {
    pub best_score: u64,
}

impl Validate for BestScoreRecord {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Keeps the best score in a small YAML file.
pub struct FileBestScoreStore {
    manager: ConfigManager<FileContentConfigProvider, BestScoreRecord>,
}

impl FileBestScoreStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            manager: ConfigManager::from_yaml_file(file_path),
        }
    }

    pub fn path(&self) -> &Path {
        self.manager.content_provider().file_path()
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn read(&self) -> u64 {
        match self.manager.get_config() {
            Ok(record) => record.best_score,
            Err(e) => {
                log!("Failed to read best score from {}: {}", self.path().display(), e);
                0
            }
        }
    }

    fn write(&self, value: u64) {
        let record = BestScoreRecord { best_score: value };
        if let Err(e) = self.manager.set_config(&record) {
            log!("Failed to save best score to {}: {}", self.path().display(), e);
        }
    }
}
