//! Search configuration.
//!
//! ## Example
//!
//! ```ignore
//! use hash_search_core::config::SearchConfig;
//!
//! let config = SearchConfig::builder()
//!     .window_size(1 << 24)
//!     .threads(8)
//!     .build()?;
//! ```
//!
//! Configuration files are TOML with the same field names:
//!
//! ```toml
//! window_size = 16777216
//! threads = 8
//! progress = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::planner::MAX_WINDOW_SIZE;

/// Configuration for a search run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest number of candidates per dispatch
    pub window_size: u64,
    /// Backend worker threads (0 = one per core)
    pub threads: usize,
    /// Whether to draw console progress
    pub progress: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            window_size: MAX_WINDOW_SIZE,
            threads: 0,
            progress: true,
        }
    }
}

impl SearchConfig {
    /// Create a new configuration builder
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SearchConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!("Loaded search config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::InvalidWindowSize);
        }
        Ok(())
    }
}

/// Builder for SearchConfig
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    base: Option<SearchConfig>,
    window_size: Option<u64>,
    threads: Option<usize>,
    progress: Option<bool>,
}

impl SearchConfigBuilder {
    /// Start from an existing configuration instead of the defaults
    pub fn base(mut self, config: SearchConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Set the dispatch window cap
    pub fn window_size(mut self, size: u64) -> Self {
        self.window_size = Some(size);
        self
    }

    /// Set the backend worker count
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Enable or disable console progress
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = Some(enabled);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SearchConfig> {
        let base = self.base.unwrap_or_default();
        let config = SearchConfig {
            window_size: self.window_size.unwrap_or(base.window_size),
            threads: self.threads.unwrap_or(base.threads),
            progress: self.progress.unwrap_or(base.progress),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.window_size, MAX_WINDOW_SIZE);
        assert_eq!(config.threads, 0);
        assert!(config.progress);
    }

    #[test]
    fn test_builder_overrides() {
        let config = SearchConfig::builder()
            .window_size(1024)
            .threads(4)
            .progress(false)
            .build()
            .unwrap();
        assert_eq!(config.window_size, 1024);
        assert_eq!(config.threads, 4);
        assert!(!config.progress);
    }

    #[test]
    fn test_builder_keeps_base_values() {
        let base = SearchConfig {
            window_size: 77,
            threads: 3,
            progress: false,
        };
        let config = SearchConfig::builder().base(base).threads(5).build().unwrap();
        assert_eq!(config.window_size, 77);
        assert_eq!(config.threads, 5);
        assert!(!config.progress);
    }

    #[test]
    fn test_builder_rejects_zero_window() {
        let result = SearchConfig::builder().window_size(0).build();
        assert!(matches!(result, Err(Error::InvalidWindowSize)));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "threads = 6").unwrap();

        let config = SearchConfig::load(file.path()).unwrap();
        assert_eq!(config.threads, 6);
        assert_eq!(config.window_size, MAX_WINDOW_SIZE);
        assert!(config.progress);
    }

    #[test]
    fn test_load_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "window_size = 4096\nthreads = 2\nprogress = false").unwrap();

        let config = SearchConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            SearchConfig {
                window_size: 4096,
                threads: 2,
                progress: false,
            }
        );
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "window_size = \"big\"").unwrap();
        assert!(matches!(
            SearchConfig::load(file.path()),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SearchConfig::load("/nonexistent/hash-search.toml").unwrap_err();
        assert!(err.is_not_found());
    }
}
