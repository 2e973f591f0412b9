use std::collections::{BTreeMap, BTreeSet};

use aho_corasick::{AhoCorasick, MatchKind};

use super::CharFilter;
use crate::error::{LexIndexError, Result};

/// Replaces configured source sequences with their targets.
///
/// The text is scanned left to right. At each position the longest matching
/// source wins and scanning resumes after it; replacements are never
/// re-scanned.
#[derive(Debug)]
pub struct MappingCharFilter {
    ac: Option<AhoCorasick>,
    replacements: Vec<String>,
    name: &'static str,
}

impl MappingCharFilter {
    /// Build a filter from a source -> target table. Empty sources are ignored.
    pub fn new(mapping: &BTreeMap<String, String>) -> Result<Self> {
        let pairs = mapping
            .iter()
            .filter(|(source, _)| !source.is_empty())
            .map(|(source, target)| (source.clone(), target.clone()));
        Self::build(pairs, "mapping")
    }

    /// Build a filter that maps each alternate space sequence to `" "`.
    pub fn spaces(spaces: &BTreeSet<String>) -> Result<Self> {
        let pairs = spaces
            .iter()
            .filter(|space| !space.is_empty() && space.as_str() != " ")
            .map(|space| (space.clone(), " ".to_string()));
        Self::build(pairs, "space_mapping")
    }

    fn build(
        pairs: impl Iterator<Item = (String, String)>,
        name: &'static str,
    ) -> Result<Self> {
        let (keys, replacements): (Vec<String>, Vec<String>) = pairs.unzip();

        if keys.is_empty() {
            return Ok(Self {
                ac: None,
                replacements,
                name,
            });
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keys)
            .map_err(|e| LexIndexError::Anyhow(anyhow::Error::from(e)))?;

        Ok(Self {
            ac: Some(ac),
            replacements,
            name,
        })
    }

    /// Number of configured source sequences.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> String {
        let Some(ac) = &self.ac else {
            return input.to_string();
        };

        let mut output = String::with_capacity(input.len());
        let mut last_match_end = 0;

        for m in ac.find_iter(input) {
            output.push_str(&input[last_match_end..m.start()]);
            output.push_str(&self.replacements[m.pattern().as_usize()]);
            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);
        output
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_mapping_char_filter() {
        let filter = MappingCharFilter::new(&table(&[("ph", "f"), ("qu", "k")])).unwrap();
        assert_eq!(filter.filter("phone queue"), "fone keue");
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.name(), "mapping");
    }

    #[test]
    fn test_mapping_expansion_is_not_rescanned() {
        let filter = MappingCharFilter::new(&table(&[("a", "aaa")])).unwrap();
        assert_eq!(filter.filter("bab"), "baaab");
    }

    #[test]
    fn test_mapping_deletion() {
        let filter = MappingCharFilter::new(&table(&[("foo", "")])).unwrap();
        assert_eq!(filter.filter("afoob"), "ab");
    }

    #[test]
    fn test_mapping_overlap_prefers_longest() {
        let filter = MappingCharFilter::new(&table(&[("ab", "1"), ("abc", "2")])).unwrap();
        assert_eq!(filter.filter("abc"), "2");
        assert_eq!(filter.filter("abd"), "1d");
    }

    #[test]
    fn test_mapping_multibyte() {
        let filter = MappingCharFilter::new(&table(&[("\u{0958}", "\u{0915}\u{093C}")])).unwrap();
        assert_eq!(filter.filter("a\u{0958}b"), "a\u{0915}\u{093C}b");
    }

    #[test]
    fn test_empty_mapping_is_identity() {
        let filter = MappingCharFilter::new(&BTreeMap::new()).unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.filter("unchanged"), "unchanged");
    }

    #[test]
    fn test_space_mapping() {
        let spaces: BTreeSet<String> = ["\t", "\u{00A0}", " "].iter().map(|s| s.to_string()).collect();
        let filter = MappingCharFilter::spaces(&spaces).unwrap();
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.filter("a\tb\u{00A0}c d"), "a b c d");
        assert_eq!(filter.name(), "space_mapping");
    }
}
