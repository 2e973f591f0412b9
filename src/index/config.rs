//! Configuration for index building.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexIndexError, Result};

/// Wildcard variants seen fewer times than this are pruned.
pub const DEFAULT_MIN_COUNT: usize = 1024;

/// Positions beyond this are always wildcarded.
pub const DEFAULT_MAX_KEY_LEN: usize = 10;

/// Largest supported `max_key_len`; each record enumerates `2^max_key_len`
/// variants.
pub const MAX_KEY_LEN_LIMIT: usize = 20;

/// Default shard count for the anagram and phonetic indexes.
pub const DEFAULT_SHARDS: usize = 2000;

/// Configuration for building the wildcard, anagram and phonetic indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Minimum summed form count for a non-wildcard variant key to be kept.
    pub min_count: usize,

    /// Number of leading letter positions enumerated into variants.
    pub max_key_len: usize,

    pub anagram_shards: usize,

    pub phonetic_shards: usize,

    /// Count wildcard variants on the rayon thread pool.
    pub parallel: bool,

    /// Worker threads for parallel builds. `None` uses one per CPU.
    pub thread_pool_size: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            max_key_len: DEFAULT_MAX_KEY_LEN,
            anagram_shards: DEFAULT_SHARDS,
            phonetic_shards: DEFAULT_SHARDS,
            parallel: true,
            thread_pool_size: None,
        }
    }
}

impl IndexConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| LexIndexError::source_unavailable(path, e))?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce an index.
    pub fn validate(&self) -> Result<()> {
        if self.anagram_shards == 0 {
            return Err(LexIndexError::invalid_config(
                "anagram_shards must be greater than 0",
            ));
        }
        if self.phonetic_shards == 0 {
            return Err(LexIndexError::invalid_config(
                "phonetic_shards must be greater than 0",
            ));
        }
        if self.max_key_len == 0 || self.max_key_len > MAX_KEY_LEN_LIMIT {
            return Err(LexIndexError::invalid_config(format!(
                "max_key_len must be between 1 and {MAX_KEY_LEN_LIMIT}, got {}",
                self.max_key_len
            )));
        }
        if self.thread_pool_size == Some(0) {
            return Err(LexIndexError::invalid_config(
                "thread_pool_size must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Set the minimum variant count.
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    /// Set both shard counts.
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.anagram_shards = shards;
        self.phonetic_shards = shards;
        self
    }

    /// Enable or disable parallel counting.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of worker threads the build will use.
    pub fn effective_threads(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get)
    }
}
