//! Phrase records and the lexicon container.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::Script;
use crate::analysis::profile::LanguageProfile;

/// One canonical lexicon entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseRecord {
    /// Uppercase letters and single spaces, e.g. `"ROCK N ROLL"`.
    pub normalized: String,

    /// The canonical letters of `normalized`, spaces removed.
    pub letters: Vec<String>,

    /// Global index of the first form.
    pub base_index: u32,

    /// Surface variants (case/punctuation), each with its own global index.
    pub forms: BTreeSet<String>,

    /// Popularity score; higher ranks first.
    pub importance: f64,

    /// Known pronunciations, each a sequence of phoneme symbols.
    pub phonemes: BTreeSet<Vec<String>>,
}

impl PhraseRecord {
    /// Create a record with a single form.
    pub fn new(normalized: String, letters: Vec<String>, form: String, importance: f64) -> Self {
        let mut forms = BTreeSet::new();
        forms.insert(form);
        Self {
            normalized,
            letters,
            base_index: 0,
            forms,
            importance,
            phonemes: BTreeSet::new(),
        }
    }

    /// The reserved empty phrase at index 0.
    pub fn sentinel() -> Self {
        Self::new(String::new(), Vec::new(), String::new(), 0.0)
    }

    /// Whether this is the empty sentinel phrase.
    pub fn is_sentinel(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Global indices of this record's forms.
    pub fn form_indices(&self) -> Range<u32> {
        self.base_index..self.base_index + self.forms.len() as u32
    }
}

/// The ordered canonical lexicon plus the profile tables downstream
/// consumers need.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Language code of the profile the lexicon was built with.
    pub language: String,

    pub script: Script,

    /// Records in final order; `records[0]` is the sentinel.
    pub records: Vec<PhraseRecord>,

    /// Canonical letters observed in the lexicon.
    pub letters: BTreeSet<String>,

    /// The profile alphabet (vowels then consonants).
    pub alphabet: Vec<String>,

    pub combiners: BTreeSet<String>,

    pub punctuation: BTreeSet<String>,

    pub spaces: BTreeSet<String>,

    pub conversions: BTreeMap<String, String>,

    /// Separator for joining phoneme symbols into phonetic keys.
    pub phoneme_separator: String,
}

impl Lexicon {
    /// Create a lexicon holding only the sentinel record.
    pub fn new(profile: &LanguageProfile) -> Self {
        Self {
            language: profile.language.clone(),
            script: profile.script,
            records: vec![PhraseRecord::sentinel()],
            letters: BTreeSet::new(),
            alphabet: profile.alphabet().cloned().collect(),
            combiners: profile.combiners.clone(),
            punctuation: profile.punctuation.clone(),
            spaces: profile.spaces.clone(),
            conversions: profile.conversions.clone(),
            phoneme_separator: profile.phoneme_separator.clone(),
        }
    }

    /// Number of records, sentinel included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of forms, i.e. the number of global indices.
    pub fn total_forms(&self) -> usize {
        self.records.iter().map(|r| r.forms.len()).sum()
    }

    /// All forms in global index order.
    pub fn forms(&self) -> impl Iterator<Item = &String> {
        self.records.iter().flat_map(|r| r.forms.iter())
    }

    /// The record owning a global index.
    pub fn record_for_index(&self, index: u32) -> Option<&PhraseRecord> {
        let pos = self
            .records
            .partition_point(|r| r.base_index <= index)
            .checked_sub(1)?;
        let record = &self.records[pos];
        record.form_indices().contains(&index).then_some(record)
    }

    /// The form at a global index.
    pub fn form(&self, index: u32) -> Option<&String> {
        let record = self.record_for_index(index)?;
        record.forms.iter().nth((index - record.base_index) as usize)
    }

    /// Map from normalized phrase to record position.
    pub fn positions_by_normalized(&self) -> AHashMap<&str, usize> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.normalized.as_str(), i))
            .collect()
    }

    /// Sort key placing a (possibly composed) letter in alphabet order.
    ///
    /// Trailing combiners are ignored when locating the base letter; letters
    /// outside the alphabet sort last.
    pub fn letter_rank<'a>(&self, letter: &'a str) -> (usize, &'a str) {
        let mut base = letter;
        while let Some(stripped) = self
            .combiners
            .iter()
            .find_map(|c| base.strip_suffix(c.as_str()))
        {
            if stripped.is_empty() {
                break;
            }
            base = stripped;
        }
        let rank = self
            .alphabet
            .iter()
            .position(|a| a == base)
            .unwrap_or(usize::MAX);
        (rank, letter)
    }

    /// Reassign base indices as a running sum of form counts.
    pub fn assign_base_indices(&mut self) {
        let mut next = 0u32;
        for record in &mut self.records {
            debug_assert!(!record.forms.is_empty(), "record without forms");
            record.base_index = next;
            next += record.forms.len() as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        let profile = LanguageProfile::builtin("English").unwrap();
        let mut lexicon = Lexicon::new(&profile);
        let mut cat = PhraseRecord::new(
            "CAT".to_string(),
            vec!["C".into(), "A".into(), "T".into()],
            "cat".to_string(),
            5.0,
        );
        cat.forms.insert("Cat".to_string());
        lexicon.records.push(cat);
        lexicon.records.push(PhraseRecord::new(
            "DOG".to_string(),
            vec!["D".into(), "O".into(), "G".into()],
            "dog".to_string(),
            3.0,
        ));
        lexicon.assign_base_indices();
        lexicon
    }

    #[test]
    fn test_base_indices_are_contiguous() {
        let lexicon = lexicon();
        assert_eq!(lexicon.records[0].base_index, 0);
        assert_eq!(lexicon.records[1].base_index, 1);
        assert_eq!(lexicon.records[2].base_index, 3);
        assert_eq!(lexicon.total_forms(), 4);
        assert_eq!(lexicon.records[1].form_indices(), 1..3);
    }

    #[test]
    fn test_index_lookup() {
        let lexicon = lexicon();
        assert!(lexicon.record_for_index(0).unwrap().is_sentinel());
        assert_eq!(lexicon.record_for_index(2).unwrap().normalized, "CAT");
        assert_eq!(lexicon.record_for_index(3).unwrap().normalized, "DOG");
        assert!(lexicon.record_for_index(4).is_none());

        assert_eq!(lexicon.form(1).map(String::as_str), Some("Cat"));
        assert_eq!(lexicon.form(2).map(String::as_str), Some("cat"));
        let forms: Vec<&String> = lexicon.forms().collect();
        assert_eq!(forms, vec!["", "Cat", "cat", "dog"]);
    }

    #[test]
    fn test_letter_rank_uses_alphabet_order() {
        let lexicon = lexicon();
        assert!(lexicon.letter_rank("E") < lexicon.letter_rank("B"));
        assert_eq!(lexicon.letter_rank("?").0, usize::MAX);
    }

    #[test]
    fn test_letter_rank_strips_combiners() {
        let profile = LanguageProfile::builtin("Hindi").unwrap();
        let lexicon = Lexicon::new(&profile);
        let ka = lexicon.letter_rank("क").0;
        assert_eq!(lexicon.letter_rank("कि").0, ka);
        assert!(lexicon.letter_rank("कि") > lexicon.letter_rank("क"));
        assert!(lexicon.letter_rank("अ") < lexicon.letter_rank("क"));
    }

    #[test]
    fn test_positions_by_normalized() {
        let lexicon = lexicon();
        let positions = lexicon.positions_by_normalized();
        assert_eq!(positions.get("DOG"), Some(&2));
        assert_eq!(positions.get(""), Some(&0));
    }
}
