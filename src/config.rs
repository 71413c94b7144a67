//! Configuration for RosterKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, RosterError};

/// Main configuration for a RecordStore
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The single backing file holding every record.
    /// Rewritten in full on each mutation.
    pub data_file: PathBuf,

    /// Sync strategy: whether a rewrite is fsynced before returning
    pub sync_strategy: SyncStrategy,
}

/// Rewrite sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every rewrite (safest, slowest)
    EveryRewrite,

    /// leave flushing to the OS
    Never,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("students.dat"),
            sync_strategy: SyncStrategy::EveryRewrite,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the config can describe a usable store
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(RosterError::Config("data_file must not be empty".to_string()));
        }
        if self.data_file.is_dir() {
            return Err(RosterError::Config(format!(
                "data_file {} is a directory",
                self.data_file.display()
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the rewrite sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
