//! Diagnostic statistics for built indexes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::keys::all_wild;
use crate::index::sharded::ShardedIndex;
use crate::index::wildcard::WildcardBuild;

/// Wildcard index figures for one key length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLengthStats {
    pub num_keys: usize,

    /// Postings summed over all keys of this length.
    pub total_phrases: usize,

    /// Largest bucket among keys with at least one known letter.
    pub max_phrases_for_a_key: usize,

    /// Size of the all-wild bucket, i.e. forms of this length.
    pub num_distinct_phrases: usize,
}

/// Occupancy of a sharded index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardStats {
    pub num_shards: usize,
    pub total_postings: usize,

    /// Bucket size -> number of shards with that size.
    pub occupancy: BTreeMap<usize, usize>,

    pub bulkiest_shard: Option<usize>,
    pub bulkiest_size: usize,
}

impl ShardStats {
    pub fn from_index(index: &ShardedIndex) -> Self {
        let (bulkiest_shard, bulkiest_size) = match index.bulkiest() {
            Some((shard, size)) => (Some(shard), size),
            None => (None, 0),
        };
        Self {
            num_shards: index.num_shards(),
            total_postings: index.total_postings(),
            occupancy: index.occupancy(),
            bulkiest_shard,
            bulkiest_size,
        }
    }

    fn log_summary(&self, name: &str) {
        for (size, shards) in &self.occupancy {
            log::debug!("{name} bucket size {size:5}: {shards:3} shards");
        }
        match self.bulkiest_shard {
            Some(shard) => log::info!(
                "{name}: {} shards, {} postings, bulkiest shard {shard} [{}]",
                self.num_shards,
                self.total_postings,
                self.bulkiest_size
            ),
            None => log::info!("{name}: {} shards, all empty", self.num_shards),
        }
    }
}

/// Summary statistics for a complete build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Per key length (in letters).
    pub by_length: BTreeMap<usize, KeyLengthStats>,

    pub total_keys: usize,
    pub total_phrases: usize,
    pub total_distinct_phrases: usize,

    /// Variant keys counted before pruning.
    pub counted_keys: usize,

    pub anagrams: ShardStats,
    pub phonetic: ShardStats,

    /// Duplicate insertions seen while building the wildcard index.
    pub duplicate_anomalies: usize,
}

impl IndexStats {
    /// Gather statistics from built indexes.
    pub fn collect(wildcard: &WildcardBuild, anagrams: &ShardedIndex, phonetic: &ShardedIndex) -> Self {
        let mut by_length: BTreeMap<usize, KeyLengthStats> = BTreeMap::new();
        for (key, bucket) in wildcard.index.iter() {
            let size = bucket.indices.len();
            let stats = by_length.entry(bucket.letters).or_default();
            stats.num_keys += 1;
            stats.total_phrases += size;
            if all_wild(key) {
                stats.num_distinct_phrases = size;
            } else {
                stats.max_phrases_for_a_key = stats.max_phrases_for_a_key.max(size);
            }
        }

        Self {
            total_keys: by_length.values().map(|s| s.num_keys).sum(),
            total_phrases: by_length.values().map(|s| s.total_phrases).sum(),
            total_distinct_phrases: by_length.values().map(|s| s.num_distinct_phrases).sum(),
            by_length,
            counted_keys: wildcard.counted_keys,
            anagrams: ShardStats::from_index(anagrams),
            phonetic: ShardStats::from_index(phonetic),
            duplicate_anomalies: wildcard.anomalies,
        }
    }

    /// Emit the statistics on the diagnostic stream.
    pub fn log_summary(&self) {
        for (len, stats) in &self.by_length {
            log::info!(
                "len:{len} #keys: {} #phrases: {} max-phrases-for-a-key: {} num-distinct-phrases: {}",
                stats.num_keys,
                stats.total_phrases,
                stats.max_phrases_for_a_key,
                stats.num_distinct_phrases
            );
        }
        log::info!(
            "Total #keys: {} #phrases: {} #distinct-phrases: {}",
            self.total_keys,
            self.total_phrases,
            self.total_distinct_phrases
        );
        self.anagrams.log_summary("Anagram index");
        self.phonetic.log_summary("Phonetic index");
        if self.duplicate_anomalies > 0 {
            log::warn!(
                "{} duplicate insertions while building the wildcard index",
                self.duplicate_anomalies
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::profile::LanguageProfile;
    use crate::analysis::segmenter::GraphemeSegmenter;
    use crate::index::config::IndexConfig;
    use crate::index::sharded::{build_anagram_index, build_phonetic_index};
    use crate::index::wildcard::WildcardIndexBuilder;
    use crate::lexicon::builder::LexiconBuilder;
    use crate::lexicon::config::LexiconConfig;

    #[test]
    fn test_collect_per_length() {
        let segmenter = GraphemeSegmenter::new(LanguageProfile::builtin("English").unwrap()).unwrap();
        let lexicon = LexiconBuilder::new(&segmenter, LexiconConfig::default())
            .build(&["5\tcat", "5\tCat", "3\tdog", "1\tox"])
            .unwrap()
            .lexicon;
        let config = IndexConfig::default().with_min_count(2).with_shards(10);

        let wildcard = WildcardIndexBuilder::new(&lexicon, &config).unwrap().build();
        let anagrams = build_anagram_index(&lexicon, 10).unwrap();
        let phonetic = build_phonetic_index(&lexicon, 10).unwrap();
        let stats = IndexStats::collect(&wildcard, &anagrams, &phonetic);

        let three = &stats.by_length[&3];
        assert_eq!(three.num_distinct_phrases, 3);
        // CAT's two forms give every CAT-only variant two postings.
        assert_eq!(three.max_phrases_for_a_key, 2);
        assert_eq!(stats.by_length[&2].num_distinct_phrases, 1);
        assert_eq!(stats.by_length[&0].num_distinct_phrases, 1);
        assert_eq!(stats.total_distinct_phrases, 5);
        assert_eq!(stats.total_keys, wildcard.index.len());
        assert_eq!(stats.total_phrases, wildcard.index.total_postings());

        assert_eq!(stats.anagrams.num_shards, 10);
        assert_eq!(stats.anagrams.total_postings, 4);
        assert_eq!(stats.phonetic.total_postings, 0);
        assert_eq!(stats.phonetic.bulkiest_shard, None);
        assert_eq!(stats.duplicate_anomalies, 0);
    }
}
