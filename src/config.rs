//! Configuration for capindex
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::error::{CapIndexError, Result};

/// Path token naming the index folder of a capture store
pub const INDEX_DIR_TOKEN: &str = "IDX0";

/// Path token naming the matching packet-data folder
pub const DATA_DIR_TOKEN: &str = "PKT0";

/// Default number of scan workers
pub const DEFAULT_WORKERS: usize = 10;

/// Seconds of slack applied on both sides of a time window
pub const WINDOW_SLACK_SECS: i64 = 60;

/// Main configuration for a summary run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Input Locations
    // -------------------------------------------------------------------------
    /// Directory holding the index files (`<16 digits>` filenames)
    pub index_dir: PathBuf,

    /// Directory holding the companion packet-data files
    /// Derived from `index_dir` unless set explicitly:
    ///   /store/IDX0  →  /store/PKT0
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------
    /// Only scan files whose timestamp falls inside this window
    pub window: Option<TimeWindow>,

    // -------------------------------------------------------------------------
    // Worker Pool
    // -------------------------------------------------------------------------
    /// Number of scan worker threads (>= 1)
    pub workers: usize,

    /// Capacity of the bounded work queue
    pub queue_capacity: usize,
}

/// Inclusive `[start, end]` window of Unix timestamps (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Create a window; `start` must be strictly before `end`
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if end <= start {
            return Err(CapIndexError::Config(format!(
                "start timestamp {} needs to be smaller than end timestamp {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Check whether `epoch` lies within the window, widened by
    /// `WINDOW_SLACK_SECS` on each side
    pub fn contains(&self, epoch: i64) -> bool {
        epoch >= self.start.saturating_sub(WINDOW_SLACK_SECS)
            && epoch <= self.end.saturating_add(WINDOW_SLACK_SECS)
    }
}

impl Default for Config {
    fn default() -> Self {
        let index_dir = PathBuf::from("./IDX0");
        Self {
            data_dir: data_dir_for(&index_dir),
            index_dir,
            window: None,
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_WORKERS * 2,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Derive the packet-data directory from an index directory by replacing the
/// first `IDX0` in the path with `PKT0`
pub fn data_dir_for(index_dir: &Path) -> PathBuf {
    let raw = index_dir.to_string_lossy();
    PathBuf::from(raw.replacen(INDEX_DIR_TOKEN, DATA_DIR_TOKEN, 1))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    index_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    window: Option<(i64, i64)>,
    workers: Option<usize>,
    queue_capacity: Option<usize>,
}

impl ConfigBuilder {
    /// Set the index directory
    pub fn index_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_dir = Some(path.into());
        self
    }

    /// Override the derived packet-data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Restrict the run to files inside `[start, end]`
    pub fn window(mut self, start: i64, end: i64) -> Self {
        self.window = Some((start, end));
        self
    }

    /// Set the number of worker threads
    pub fn workers(mut self, count: usize) -> Self {
        self.workers = Some(count);
        self
    }

    /// Set the work queue capacity (defaults to twice the worker count)
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let index_dir = self.index_dir.unwrap_or(defaults.index_dir);
        let data_dir = self.data_dir.unwrap_or_else(|| data_dir_for(&index_dir));

        let workers = self.workers.unwrap_or(defaults.workers);
        if workers == 0 {
            return Err(CapIndexError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }

        let queue_capacity = self.queue_capacity.unwrap_or(workers * 2).max(1);

        let window = match self.window {
            Some((start, end)) => Some(TimeWindow::new(start, end)?),
            None => None,
        };

        Ok(Config {
            index_dir,
            data_dir,
            window,
            workers,
            queue_capacity,
        })
    }
}
