//! Fixed-size hash-partitioned indexes for anagram and phonetic lookup.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{LexIndexError, Result};
use crate::index::keys::{anagram_key, index_shard, phonetic_key};
use crate::lexicon::record::Lexicon;

/// `num_shards` buckets of global indices; a key lands in exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShardedIndex {
    shards: Vec<Vec<u32>>,
}

impl ShardedIndex {
    /// Create an index with `num_shards` empty buckets.
    pub fn new(num_shards: usize) -> Result<Self> {
        if num_shards == 0 {
            return Err(LexIndexError::invalid_config(
                "a sharded index needs at least one shard",
            ));
        }
        Ok(Self {
            shards: vec![Vec::new(); num_shards],
        })
    }

    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    /// The bucket at `shard`, empty if out of range.
    pub fn shard(&self, shard: usize) -> &[u32] {
        self.shards.get(shard).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The bucket a key hashes to.
    pub fn shard_for(&self, key: &str) -> &[u32] {
        self.shard(index_shard(key, self.num_shards()))
    }

    pub fn shards(&self) -> &[Vec<u32>] {
        &self.shards
    }

    /// Append `indices` to the shard `key` hashes to and return that shard.
    pub fn append<I: IntoIterator<Item = u32>>(&mut self, key: &str, indices: I) -> usize {
        let shard = index_shard(key, self.num_shards());
        self.append_to(shard, indices);
        shard
    }

    fn append_to<I: IntoIterator<Item = u32>>(&mut self, shard: usize, indices: I) {
        self.shards[shard].extend(indices);
    }

    /// Total number of postings.
    pub fn total_postings(&self) -> usize {
        self.shards.iter().map(Vec::len).sum()
    }

    /// Bucket size -> number of shards with that size.
    pub fn occupancy(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for shard in &self.shards {
            *histogram.entry(shard.len()).or_insert(0) += 1;
        }
        histogram
    }

    /// The first largest non-empty shard and its size.
    pub fn bulkiest(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for (i, shard) in self.shards.iter().enumerate() {
            if shard.len() > best.map_or(0, |(_, size)| size) {
                best = Some((i, shard.len()));
            }
        }
        best
    }
}

/// Shard every record's forms by its anagram key.
///
/// The sentinel has no letters and therefore no anagram key.
pub fn build_anagram_index(lexicon: &Lexicon, num_shards: usize) -> Result<ShardedIndex> {
    let mut index = ShardedIndex::new(num_shards)?;
    for record in &lexicon.records {
        if record.letters.is_empty() {
            continue;
        }
        let key = anagram_key(lexicon, &record.letters);
        index.append(&key, record.form_indices());
    }
    Ok(index)
}

/// Shard every record's forms by each of its phonetic keys.
///
/// A record whose pronunciations hash to the same shard contributes its
/// indices to that shard once.
pub fn build_phonetic_index(lexicon: &Lexicon, num_shards: usize) -> Result<ShardedIndex> {
    let mut index = ShardedIndex::new(num_shards)?;
    for record in &lexicon.records {
        let shards: BTreeSet<usize> = record
            .phonemes
            .iter()
            .map(|phonemes| index_shard(&phonetic_key(lexicon, phonemes), num_shards))
            .collect();
        for shard in shards {
            index.append_to(shard, record.form_indices());
        }
    }
    Ok(index)
}
