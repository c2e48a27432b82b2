//! File-backed collaborators for the CLI.
//!
//! The rotation pipeline never touches disk. These helpers load its inputs
//! and persist its output:
//! - Fixture history as JSONL, most recent week first
//! - One JSON draft per fixture week
//! - The alias table (TOML)
//! - Availability lists, one raw name per line

mod drafts;
mod jsonl;
mod roster;

pub use drafts::*;
pub use jsonl::*;
pub use roster::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.jsonl")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.data_dir.join("drafts")
    }

    pub fn aliases_path(&self) -> PathBuf {
        self.data_dir.join("aliases.toml")
    }

    pub fn availability_dir(&self) -> PathBuf {
        self.data_dir.join("availability")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
