use rocket::figment::Figment;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::store::StoreConfig;

/// Read from the `poll` table of `Rocket.toml` or `ROCKET_POLL={...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file backing the key-value store; in-memory when unset.
    pub storage_path: Option<PathBuf>,
    pub simulated_latency_ms: u64,
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            simulated_latency_ms: 300,
            seed: true,
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, rocket::figment::Error> {
        if !figment.contains("poll") {
            info!("No [poll] config found, using defaults");
            return Ok(Self::default());
        }
        figment.extract_inner("poll")
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            latency: Duration::from_millis(self.simulated_latency_ms),
            seed: self.seed,
        }
    }

    pub fn storage(&self) -> Box<dyn Storage> {
        match &self.storage_path {
            Some(path) => {
                info!("📁 Using file storage at {}", path.display());
                Box::new(FileStorage::new(path))
            }
            None => {
                info!("🧠 Using in-memory storage");
                Box::new(MemoryStorage::new())
            }
        }
    }
}
