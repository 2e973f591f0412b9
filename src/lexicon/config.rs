//! Configuration for lexicon building.

use serde::{Deserialize, Serialize};

/// Default maximum number of letters in an entry.
pub const DEFAULT_MAX_ENTRY_LETTERS: usize = 30;

/// Configuration for [`LexiconBuilder`](super::LexiconBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Entries with more letters than this are skipped.
    pub max_entry_letters: usize,

    /// Segment input lines on the rayon thread pool.
    pub parallel: bool,

    /// Log a progress line every this many records (0 disables).
    pub progress_interval: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            max_entry_letters: DEFAULT_MAX_ENTRY_LETTERS,
            parallel: true,
            progress_interval: 1000,
        }
    }
}

impl LexiconConfig {
    /// Set the maximum entry length in letters.
    pub fn with_max_entry_letters(mut self, max: usize) -> Self {
        self.max_entry_letters = max;
        self
    }

    /// Enable or disable parallel segmentation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
