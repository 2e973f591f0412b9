//! The wildcard pattern index.
//!
//! Every record contributes each of its `2^L` wildcard variants (see
//! [`wildcard_variants`]) so a single lookup answers any partial pattern.
//! Building takes two passes: the first counts how many forms each variant
//! would hold, the second fills only the variants that survive pruning.

use std::collections::{BTreeMap, BTreeSet};

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::index::config::IndexConfig;
use crate::index::keys::{all_wild, wildcard_variants};
use crate::lexicon::record::{Lexicon, PhraseRecord};

const PROGRESS_INTERVAL: usize = 1000;

/// Global indices matching one pattern key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardBucket {
    /// Letter length of the key (not its byte length).
    pub letters: usize,

    /// Matching global indices, ascending.
    pub indices: BTreeSet<u32>,
}

/// Mapping from pattern key to matching global indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardIndex {
    buckets: BTreeMap<String, WildcardBucket>,
}

impl WildcardIndex {
    /// Indices matching `key`, if the key was retained.
    pub fn get(&self, key: &str) -> Option<&BTreeSet<u32>> {
        self.buckets.get(key).map(|b| &b.indices)
    }

    pub fn bucket(&self, key: &str) -> Option<&WildcardBucket> {
        self.buckets.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Number of retained keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Keys and buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &WildcardBucket)> {
        self.buckets.iter()
    }

    /// Total number of postings across all keys.
    pub fn total_postings(&self) -> usize {
        self.buckets.values().map(|b| b.indices.len()).sum()
    }
}

impl Serialize for WildcardIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (key, bucket) in &self.buckets {
            map.serialize_entry(key, &bucket.indices)?;
        }
        map.end()
    }
}

/// A built wildcard index plus build diagnostics.
#[derive(Debug, Clone)]
pub struct WildcardBuild {
    pub index: WildcardIndex,

    /// Distinct variant keys seen before pruning.
    pub counted_keys: usize,

    /// Duplicate insertions observed while filling buckets.
    pub anomalies: usize,
}

/// Builds a [`WildcardIndex`] from a lexicon.
pub struct WildcardIndexBuilder<'a> {
    lexicon: &'a Lexicon,
    min_count: usize,
    max_key_len: usize,
    parallel: bool,
}

impl<'a> WildcardIndexBuilder<'a> {
    /// Create a builder, rejecting configs that [`IndexConfig::validate`]
    /// refuses.
    pub fn new(lexicon: &'a Lexicon, config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lexicon,
            min_count: config.min_count,
            max_key_len: config.max_key_len,
            parallel: config.parallel,
        })
    }

    /// Pass 1: summed form counts per variant key.
    pub fn count_variants(&self) -> AHashMap<String, usize> {
        let count_record = |mut counts: AHashMap<String, usize>, record: &PhraseRecord| {
            for key in wildcard_variants(&record.letters, self.max_key_len) {
                *counts.entry(key).or_insert(0) += record.forms.len();
            }
            counts
        };

        if self.parallel {
            self.lexicon
                .records
                .par_iter()
                .fold(AHashMap::new, count_record)
                .reduce(AHashMap::new, merge_counts)
        } else {
            self.lexicon
                .records
                .iter()
                .fold(AHashMap::new(), count_record)
        }
    }

    /// Keys that survive pruning: frequent enough, or fully wildcarded.
    pub fn retained_keys(&self, counts: &AHashMap<String, usize>) -> AHashSet<String> {
        counts
            .iter()
            .filter(|(key, count)| **count >= self.min_count || all_wild(key))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Run both passes.
    pub fn build(&self) -> WildcardBuild {
        let counts = self.count_variants();
        log::info!("Pre-filtering, wildcard index has {} keys", counts.len());
        let retained = self.retained_keys(&counts);
        log::info!("Post-filtering, wildcard index has {} keys", retained.len());

        let mut buckets: BTreeMap<String, WildcardBucket> = BTreeMap::new();
        let mut anomalies = 0;
        for (i, record) in self.lexicon.records.iter().enumerate() {
            for key in wildcard_variants(&record.letters, self.max_key_len) {
                if !retained.contains(&key) {
                    continue;
                }
                let bucket = buckets.entry(key).or_insert_with(|| WildcardBucket {
                    letters: record.letters.len(),
                    indices: BTreeSet::new(),
                });
                for index in record.form_indices() {
                    if !bucket.indices.insert(index) {
                        anomalies += 1;
                        log::warn!(
                            "Index {index} already present for normalized [{}]",
                            record.normalized
                        );
                    }
                }
            }
            if i > 0 && i % PROGRESS_INTERVAL == 0 {
                log::debug!("Indexed at {i}: {}", record.normalized);
            }
        }

        WildcardBuild {
            index: WildcardIndex { buckets },
            counted_keys: counts.len(),
            anomalies,
        }
    }
}

fn merge_counts(
    mut left: AHashMap<String, usize>,
    mut right: AHashMap<String, usize>,
) -> AHashMap<String, usize> {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (key, count) in right {
        *left.entry(key).or_insert(0) += count;
    }
    left
}
