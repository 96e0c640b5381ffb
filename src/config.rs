//! Queue configuration. Build one in code with [`QueueConfigBuilder`] or load it from
//! yaml with [`QueueConfig::from_yaml`].
//!
//! Note there's deliberately nothing in here about flush intervals or write batching: every
//! push and delete is flushed to disk before it returns, period.

use crate::error::{Error, Result};
use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the storage engine should trade space for speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    /// Favor a small on-disk footprint
    #[default]
    LowSpace,
    /// Favor write throughput
    HighThroughput,
}

impl From<StoreMode> for sled::Mode {
    fn from(mode: StoreMode) -> Self {
        match mode {
            StoreMode::LowSpace => sled::Mode::LowSpace,
            StoreMode::HighThroughput => sled::Mode::HighThroughput,
        }
    }
}

/// Configures how a [`Queue`][crate::queue::Queue] opens its storage.
#[derive(Builder, Clone, Debug, Getters, CopyGetters, PartialEq, Serialize, Deserialize)]
#[builder(build_fn(error = "Error"))]
pub struct QueueConfig {
    /// The directory holding the queue's data
    #[getset(get = "pub")]
    #[builder(setter(into))]
    path: PathBuf,
    /// Size (in bytes) of the storage engine's page cache
    #[getset(get_copy = "pub")]
    #[builder(default = "1024 * 1024")]
    #[serde(default = "default_cache_capacity")]
    cache_capacity: u64,
    /// Space/speed tradeoff for the storage engine
    #[getset(get_copy = "pub")]
    #[builder(default)]
    #[serde(default)]
    mode: StoreMode,
    /// If true, the data is removed when the queue is dropped. Mostly for tests.
    #[getset(get_copy = "pub")]
    #[builder(default)]
    #[serde(default)]
    temporary: bool,
}

fn default_cache_capacity() -> u64 {
    1024 * 1024
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::Config(err.to_string())
    }
}

impl QueueConfig {
    /// Default config pointing at the given path.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache_capacity: default_cache_capacity(),
            mode: StoreMode::default(),
            temporary: false,
        }
    }

    /// Parse a config from a yaml string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a yaml file.
    pub fn from_yaml_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let contents = std::fs::read_to_string(file)?;
        Self::from_yaml(&contents)
    }

    /// Turn this config into a [`sled::Config`].
    pub(crate) fn sled_config(&self) -> sled::Config {
        sled::Config::default()
            .path(&self.path)
            .cache_capacity(self.cache_capacity)
            .mode(self.mode.into())
            .temporary(self.temporary)
            // we flush on every write ourselves; no background flusher needed
            .flush_every_ms(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds() {
        let config = QueueConfigBuilder::default()
            .path("/tmp/jobs")
            .mode(StoreMode::HighThroughput)
            .build()
            .unwrap();
        assert_eq!(config.path(), &PathBuf::from("/tmp/jobs"));
        assert_eq!(config.cache_capacity(), 1024 * 1024);
        assert_eq!(config.mode(), StoreMode::HighThroughput);
        assert_eq!(config.temporary(), false);
        assert_eq!(config, QueueConfig {
            mode: StoreMode::HighThroughput,
            ..QueueConfig::for_path("/tmp/jobs")
        });
    }

    #[test]
    fn builder_needs_path() {
        let res = QueueConfigBuilder::default().cache_capacity(4096).build();
        assert!(matches!(res, Err(Error::Config(_))));
    }

    #[test]
    fn from_yaml() {
        let config = QueueConfig::from_yaml("path: /var/lib/jobs\nmode: high_throughput\n").unwrap();
        assert_eq!(config.path(), &PathBuf::from("/var/lib/jobs"));
        assert_eq!(config.mode(), StoreMode::HighThroughput);
        assert_eq!(config.cache_capacity(), 1024 * 1024);

        let config = QueueConfig::from_yaml("path: q\ncache_capacity: 4096\ntemporary: true\n").unwrap();
        assert_eq!(config.cache_capacity(), 4096);
        assert!(config.temporary());
        assert_eq!(config.mode(), StoreMode::LowSpace);

        assert!(matches!(QueueConfig::from_yaml("mode: fast\n"), Err(Error::Config(_))));
    }

    #[test]
    fn from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("queue.yaml");
        std::fs::write(&file, "path: /var/lib/jobs\n").unwrap();
        let config = QueueConfig::from_yaml_file(&file).unwrap();
        assert_eq!(config, QueueConfig::for_path("/var/lib/jobs"));
        assert!(matches!(QueueConfig::from_yaml_file(dir.path().join("nope.yaml")), Err(Error::Io(_))));
    }
}
