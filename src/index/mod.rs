//! Index module for lexindex.
//!
//! This module builds the lookup structures over a finished [`Lexicon`]:
//! the pruned wildcard pattern index and the hash-sharded anagram and
//! phonetic indexes, plus diagnostics and the combined build output.

pub mod config;
pub mod keys;
pub mod output;
pub mod sharded;
pub mod stats;
pub mod wildcard;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{LexIndexError, Result};
use crate::lexicon::record::Lexicon;

// Re-export commonly used types
pub use config::IndexConfig;
pub use output::BuildOutput;
pub use sharded::{ShardedIndex, build_anagram_index, build_phonetic_index};
pub use stats::{IndexStats, KeyLengthStats, ShardStats};
pub use wildcard::{WildcardBucket, WildcardBuild, WildcardIndex, WildcardIndexBuilder};

/// All indexes built from one lexicon.
#[derive(Debug, Clone)]
pub struct LexiconIndex {
    pub wildcard: WildcardIndex,
    pub anagrams: ShardedIndex,
    pub phonetic: ShardedIndex,
    pub stats: IndexStats,
}

/// Builds every index for a lexicon, on a dedicated thread pool when the
/// config asks for parallel work.
pub struct IndexBuilder {
    config: IndexConfig,
    thread_pool: Option<ThreadPool>,
}

impl IndexBuilder {
    /// Validate `config` and set up its thread pool. The pool has
    /// `thread_pool_size` workers, or one per CPU when that is unset.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = if config.parallel {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(config.effective_threads())
                    .thread_name(|i| format!("lexindex-{i}"))
                    .build()
                    .map_err(|e| {
                        LexIndexError::other(format!("Failed to create thread pool: {e}"))
                    })?,
            )
        } else {
            None
        };

        Ok(Self {
            config,
            thread_pool,
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of worker threads the build runs on.
    pub fn num_threads(&self) -> usize {
        self.thread_pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    /// Build the wildcard, anagram and phonetic indexes.
    pub fn build(&self, lexicon: &Lexicon) -> Result<LexiconIndex> {
        match &self.thread_pool {
            Some(pool) => pool.install(|| self.build_all(lexicon)),
            None => self.build_all(lexicon),
        }
    }

    fn build_all(&self, lexicon: &Lexicon) -> Result<LexiconIndex> {
        log::info!(
            "Building indexes for {} records ({} forms) on {} threads",
            lexicon.len(),
            lexicon.total_forms(),
            self.num_threads()
        );

        let wildcard = WildcardIndexBuilder::new(lexicon, &self.config)?.build();
        let anagrams = build_anagram_index(lexicon, self.config.anagram_shards)?;
        let phonetic = build_phonetic_index(lexicon, self.config.phonetic_shards)?;

        let stats = IndexStats::collect(&wildcard, &anagrams, &phonetic);
        stats.log_summary();

        Ok(LexiconIndex {
            wildcard: wildcard.index,
            anagrams,
            phonetic,
            stats,
        })
    }
}
