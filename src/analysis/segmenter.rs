//! Language-aware grapheme segmentation.
//!
//! The [`GraphemeSegmenter`] turns raw text into [`Part`]s for one
//! [`LanguageProfile`]:
//!
//! 1. the text is Unicode-normalized (NFC unless the profile says
//!    otherwise), then the profile's conversion table is applied left to
//!    right;
//! 2. alternate spaces are mapped to a plain space (optional);
//! 3. the text is cut into units by a [`CharClassifier`];
//! 4. for Latin-script profiles, a unit that is not a letter is replaced by
//!    its diacritic-stripped fallback when the fallback is a letter;
//! 5. letters are composed greedily: at each position the longest window of
//!    up to [`MAX_LETTER_UNITS`] units whose base (the window minus its
//!    trailing combiners) is an alphabet letter becomes one letter;
//! 6. space runs are collapsed and leading/trailing spaces dropped.
//!
//! Three reductions are layered on top: pruned parts (unrecognized units
//! dropped), letterized parts (letters uppercased, punctuation turned into
//! spaces) and bare letters.
//!
//! # Examples
//!
//! ```
//! use lexindex::analysis::profile::LanguageProfile;
//! use lexindex::analysis::segmenter::GraphemeSegmenter;
//!
//! let segmenter = GraphemeSegmenter::new(LanguageProfile::builtin("English").unwrap()).unwrap();
//! let text = "[Alpha-x 4\t\tD'e ";
//! assert_eq!(segmenter.str_parts_of(text, true), "[Alpha-x 4 D'e");
//! assert_eq!(segmenter.str_pruned_parts_of(text), "Alpha-x D'e");
//! assert_eq!(segmenter.str_letterized_pruned_parts_of(text), "ALPHA X D E");
//! assert_eq!(segmenter.str_letters_of(text), "ALPHAXDE");
//! ```

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::mapping::MappingCharFilter;
use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;
use crate::analysis::classifier::{CharClassifier, GraphemeUnit, Script, UnicodeClassifier};
use crate::analysis::part::{Part, PartKind, collapse_spaces, join_text};
use crate::analysis::profile::{LanguageProfile, MAX_LETTER_UNITS};
use crate::error::Result;

/// All segmentation layers of one text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segmentation {
    /// Output of [`GraphemeSegmenter::parts_of`] with spaces mapped.
    pub parts: Vec<Part>,

    /// Letters, allowed punctuation and single internal spaces.
    pub pruned: Vec<Part>,

    /// Uppercase letters and single internal spaces.
    pub letterized: Vec<Part>,
}

impl Segmentation {
    /// Whether every raw part survived pruning.
    pub fn is_clean(&self) -> bool {
        self.pruned.len() == self.parts.len()
    }

    /// The pruned surface form, e.g. `"Alpha-x D'e"`.
    pub fn surface(&self) -> String {
        join_text(&self.pruned)
    }

    /// The canonical form, e.g. `"ALPHA X D E"`.
    pub fn normalized(&self) -> String {
        join_text(&self.letterized)
    }

    /// The canonical letters, spaces removed.
    pub fn letters(&self) -> Vec<String> {
        self.letterized
            .iter()
            .filter(|p| p.is_letter())
            .map(|p| p.canonical.clone())
            .collect()
    }
}

/// Segments text according to a [`LanguageProfile`].
pub struct GraphemeSegmenter {
    profile: LanguageProfile,
    classifier: Arc<dyn CharClassifier>,
    normalizer: UnicodeNormalizationCharFilter,
    conversions: MappingCharFilter,
    space_mapping: MappingCharFilter,
    letter_indices: AHashMap<String, usize>,
}

impl GraphemeSegmenter {
    /// Create a segmenter backed by the [`UnicodeClassifier`].
    pub fn new(profile: LanguageProfile) -> Result<Self> {
        Self::with_classifier(profile, Arc::new(UnicodeClassifier::new()))
    }

    /// Create a segmenter with a custom classifier.
    pub fn with_classifier(
        profile: LanguageProfile,
        classifier: Arc<dyn CharClassifier>,
    ) -> Result<Self> {
        profile.validate()?;

        let normalizer = UnicodeNormalizationCharFilter::new(profile.normalization);
        let conversions = MappingCharFilter::new(&profile.conversions)?;
        let space_mapping = MappingCharFilter::spaces(&profile.spaces)?;
        let letter_indices = profile
            .alphabet()
            .enumerate()
            .map(|(i, letter)| (letter.clone(), i))
            .collect();

        Ok(Self {
            profile,
            classifier,
            normalizer,
            conversions,
            space_mapping,
            letter_indices,
        })
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Position of an uppercase letter in the profile's alphabet.
    pub fn letter_index(&self, letter: &str) -> Option<usize> {
        self.letter_indices.get(letter).copied()
    }

    /// The canonical (uppercase) letter spelled by `s`, ignoring case.
    pub fn canonical_letter(&self, s: &str) -> Option<String> {
        let units = self.classifier.units(s);
        if units.is_empty() || units.len() > MAX_LETTER_UNITS {
            return None;
        }
        self.letter_of(&units)
    }

    /// Whether `s` is a single letter of the profile, ignoring case.
    pub fn is_letter(&self, s: &str) -> bool {
        self.canonical_letter(s).is_some()
    }

    /// Whether `s` is allowed punctuation.
    pub fn is_punctuation(&self, s: &str) -> bool {
        self.profile.punctuation.contains(s)
    }

    /// Split text into letters, punctuation, spaces and unrecognized units.
    pub fn parts_of(&self, text: &str, map_spaces: bool) -> Vec<Part> {
        let converted = self.conversions.filter(&self.normalizer.filter(text));
        let spaced = if map_spaces {
            self.space_mapping.filter(&converted)
        } else {
            converted
        };

        let mut units = self.classifier.units(&spaced);
        if self.profile.script == Script::Latin {
            units = units
                .into_iter()
                .map(|unit| self.latin_fallback(unit))
                .collect();
        }

        collapse_spaces(self.compose(&units))
    }

    /// [`parts_of`](Self::parts_of) without unrecognized units.
    pub fn pruned_parts_of(&self, text: &str) -> Vec<Part> {
        prune(self.parts_of(text, true))
    }

    /// Uppercase letters and single spaces only.
    pub fn letterized_pruned_parts_of(&self, text: &str) -> Vec<Part> {
        letterize(&self.pruned_parts_of(text))
    }

    /// The canonical letters of `text`.
    pub fn letters_of(&self, text: &str) -> Vec<String> {
        self.segment(text).letters()
    }

    /// Compute all segmentation layers at once.
    pub fn segment(&self, text: &str) -> Segmentation {
        let parts = self.parts_of(text, true);
        let pruned = prune(parts.clone());
        let letterized = letterize(&pruned);
        Segmentation {
            parts,
            pruned,
            letterized,
        }
    }

    pub fn str_parts_of(&self, text: &str, map_spaces: bool) -> String {
        join_text(&self.parts_of(text, map_spaces))
    }

    pub fn str_pruned_parts_of(&self, text: &str) -> String {
        join_text(&self.pruned_parts_of(text))
    }

    pub fn str_letterized_pruned_parts_of(&self, text: &str) -> String {
        join_text(&self.letterized_pruned_parts_of(text))
    }

    pub fn str_letters_of(&self, text: &str) -> String {
        self.letters_of(text).concat()
    }

    /// Maximal runs of adjacent unrecognized units in `text`.
    pub fn unrecognized_runs(&self, text: &str) -> Vec<String> {
        let mut runs = Vec::new();
        let mut current = String::new();
        for part in self.parts_of(text, true) {
            if part.kind == PartKind::Unrecognized {
                current.push_str(&part.text);
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    fn latin_fallback(&self, unit: GraphemeUnit) -> GraphemeUnit {
        if self.letter_indices.contains_key(&unit.upper) {
            return unit;
        }
        match unit.fallback.as_deref() {
            Some(fallback) if !fallback.is_empty() => {
                let replacement = self.classifier.next_unit(fallback);
                if self.letter_indices.contains_key(&replacement.upper) {
                    replacement
                } else {
                    unit
                }
            }
            _ => unit,
        }
    }

    /// The canonical letter for a window of units, if its base is a letter.
    fn letter_of(&self, units: &[GraphemeUnit]) -> Option<String> {
        let trailing = units
            .iter()
            .rev()
            .take_while(|u| self.profile.combiners.contains(&u.text))
            .count();
        let base_len = units.len() - trailing;
        if base_len == 0 {
            return None;
        }

        let base: String = units[..base_len].iter().map(|u| u.upper.as_str()).collect();
        if !self.letter_indices.contains_key(&base) {
            return None;
        }
        Some(units.iter().map(|u| u.upper.as_str()).collect())
    }

    fn compose(&self, units: &[GraphemeUnit]) -> Vec<Part> {
        let mut parts = Vec::with_capacity(units.len());
        let mut i = 0;

        while i < units.len() {
            let widest = MAX_LETTER_UNITS.min(units.len() - i);
            let letter = (1..=widest)
                .rev()
                .find_map(|w| self.letter_of(&units[i..i + w]).map(|c| (w, c)));

            match letter {
                Some((width, canonical)) => {
                    let text: String = units[i..i + width].iter().map(|u| u.text.as_str()).collect();
                    parts.push(Part::letter(text, canonical));
                    i += width;
                }
                None => {
                    parts.push(self.non_letter(&units[i]));
                    i += 1;
                }
            }
        }

        parts
    }

    fn non_letter(&self, unit: &GraphemeUnit) -> Part {
        if unit.text == " " {
            Part::space()
        } else if self.is_punctuation(&unit.text) {
            Part::punctuation(unit.text.clone())
        } else {
            Part::unrecognized(unit.text.clone())
        }
    }
}

impl fmt::Debug for GraphemeSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeSegmenter")
            .field("profile", &self.profile.name)
            .field("classifier", &self.classifier.name())
            .field("normalization", &self.normalizer.form())
            .field("letters", &self.letter_indices.len())
            .finish()
    }
}

fn prune(parts: Vec<Part>) -> Vec<Part> {
    collapse_spaces(
        parts
            .into_iter()
            .filter(|p| p.kind != PartKind::Unrecognized)
            .collect(),
    )
}

fn letterize(pruned: &[Part]) -> Vec<Part> {
    collapse_spaces(
        pruned
            .iter()
            .map(|p| match p.kind {
                PartKind::Letter => Part::letter(p.canonical.clone(), p.canonical.clone()),
                _ => Part::space(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::unicode_normalize::NormalizationForm;

    fn segmenter(name: &str) -> GraphemeSegmenter {
        GraphemeSegmenter::new(LanguageProfile::builtin(name).unwrap()).unwrap()
    }

    fn texts(parts: &[Part]) -> Vec<&str> {
        parts.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_parts_of_english() {
        let seg = segmenter("English");
        let parts = seg.parts_of("[Alpha-x 4\t\tD'e ", true);
        assert_eq!(
            texts(&parts),
            vec!["[", "A", "l", "p", "h", "a", "-", "x", " ", "4", " ", "D", "'", "e"]
        );
        assert_eq!(parts[0].kind, PartKind::Unrecognized);
        assert_eq!(parts[6].kind, PartKind::Punctuation);
        assert_eq!(parts[2].canonical, "L");
    }

    #[test]
    fn test_pruned_and_letterized() {
        let seg = segmenter("English");
        let text = "[Alpha-x 4\t\tD'e ";
        assert_eq!(
            texts(&seg.pruned_parts_of(text)),
            vec!["A", "l", "p", "h", "a", "-", "x", " ", "D", "'", "e"]
        );
        assert_eq!(
            texts(&seg.letterized_pruned_parts_of(text)),
            vec!["A", "L", "P", "H", "A", " ", "X", " ", "D", " ", "E"]
        );
        assert_eq!(seg.letters_of(text), vec!["A", "L", "P", "H", "A", "X", "D", "E"]);
    }

    #[test]
    fn test_spaces_not_mapped() {
        let seg = segmenter("English");
        let parts = seg.parts_of("a\tb", false);
        assert_eq!(parts[1].kind, PartKind::Unrecognized);
        assert_eq!(seg.str_parts_of("a\tb", true), "a b");
    }

    #[test]
    fn test_conversions_apply_before_segmentation() {
        let seg = segmenter("English");
        assert_eq!(seg.str_pruned_parts_of("don\u{2019}t"), "don't");

        let german = segmenter("German");
        assert_eq!(german.str_letterized_pruned_parts_of("Straße"), "STRASSE");
        assert_eq!(german.str_letters_of("Müller"), "MUELLER");
    }

    #[test]
    fn test_latin_fallback_strips_diacritics() {
        let seg = segmenter("English");
        assert_eq!(seg.str_letterized_pruned_parts_of("Café crème"), "CAFE CREME");
        let parts = seg.pruned_parts_of("é");
        assert_eq!(parts[0].text, "e");
    }

    #[test]
    fn test_decomposed_accents_match_precomposed() {
        let seg = segmenter("English");
        let decomposed = seg.segment("Cafe\u{0301}");
        assert!(decomposed.is_clean());
        assert_eq!(decomposed, seg.segment("Caf\u{00E9}"));
        assert_eq!(decomposed.surface(), "Cafe");

        let spanish = segmenter("Spanish");
        assert_eq!(spanish.str_letters_of("an\u{0303}o"), "AÑO");
        let german = segmenter("German");
        assert_eq!(german.str_letters_of("Mu\u{0308}ller"), "MUELLER");
    }

    #[test]
    fn test_profile_selects_normalization_form() {
        let mut profile = LanguageProfile::builtin("English").unwrap();
        profile.normalization = NormalizationForm::NFKC;
        let seg = GraphemeSegmenter::new(profile).unwrap();
        assert_eq!(seg.str_letters_of("\u{FF23}at"), "CAT");
        assert!(!segmenter("English").segment("\u{FF23}at").is_clean());
    }

    #[test]
    fn test_fallback_not_used_for_alphabet_letters() {
        let seg = segmenter("Spanish");
        assert_eq!(seg.str_letters_of("año"), "AÑO");
        assert_eq!(seg.str_letters_of("canción"), "CANCION");
    }

    #[test]
    fn test_devanagari_combiners_compose() {
        let seg = segmenter("Hindi");
        // कि = क + vowel sign i; नं = न + anusvara
        let letters = seg.letters_of("किताब नं");
        assert_eq!(letters, vec!["कि", "ता", "ब", "नं"]);
    }

    #[test]
    fn test_devanagari_conjunct_splits_at_virama() {
        let seg = segmenter("Hindi");
        let letters = seg.letters_of("क्ष");
        assert_eq!(letters, vec!["क्", "ष"]);
    }

    #[test]
    fn test_devanagari_nukta_conversion() {
        let seg = segmenter("Hindi");
        let letters = seg.letters_of("\u{095B}");
        assert_eq!(letters, vec!["\u{091C}\u{093C}"]);
    }

    #[test]
    fn test_lone_combiner_is_unrecognized() {
        let seg = segmenter("Hindi");
        let parts = seg.parts_of("\u{093F}क", true);
        assert_eq!(parts[0].kind, PartKind::Unrecognized);
        assert!(parts[1].is_letter());
    }

    #[test]
    fn test_multi_unit_phonemes() {
        let seg = segmenter("Phonetics");
        assert_eq!(seg.letters_of("B AH0 N AE1 N AH0"), vec!["B", "AH", "N", "AE", "N", "AH"]);
        assert_eq!(seg.letters_of("HH AH0 NG"), vec!["HH", "AH", "NG"]);
    }

    #[test]
    fn test_ipa_phonemes() {
        let seg = segmenter("Phonetics");
        assert_eq!(seg.letters_of("bəˈnænə"), vec!["B", "AH", "N", "AE", "N", "AH"]);
        assert_eq!(seg.letters_of("ˈtʃɜːtʃ"), vec!["CH", "ER", "CH"]);
        assert_eq!(seg.letters_of("ɹiːd"), seg.letters_of("R IY1 D"));
        assert_eq!(seg.letters_of("ˈfɪŋɡɚ"), vec!["F", "IH", "NG", "G", "ER"]);
        assert!(seg.segment("ˈaɪs kɹiːm").is_clean());
    }

    #[test]
    fn test_letterized_is_idempotent() {
        let inputs = [
            "[Alpha-x 4\t\tD'e ",
            "  Rock 'n' roll!  ",
            "Café--crème",
            "x",
            "",
        ];
        let seg = segmenter("English");
        for input in inputs {
            let once = seg.str_letterized_pruned_parts_of(input);
            let twice = seg.str_letterized_pruned_parts_of(&once);
            assert_eq!(once, twice, "input {input:?}");
        }

        let hindi = segmenter("Hindi");
        let once = hindi.str_letterized_pruned_parts_of("किताब - क्षमा");
        assert_eq!(hindi.str_letterized_pruned_parts_of(&once), once);
    }

    #[test]
    fn test_segmentation_layers() {
        let seg = segmenter("English");
        let s = seg.segment("Rock 'n' Roll");
        assert!(s.is_clean());
        assert_eq!(s.surface(), "Rock 'n' Roll");
        assert_eq!(s.normalized(), "ROCK N ROLL");
        assert_eq!(s.letters().concat(), "ROCKNROLL");

        let dirty = seg.segment("R2D2");
        assert!(!dirty.is_clean());
        assert_eq!(dirty.normalized(), "RD");
    }

    #[test]
    fn test_letter_queries() {
        let seg = segmenter("English");
        assert!(seg.is_letter("q"));
        assert!(!seg.is_letter("qu"));
        assert_eq!(seg.canonical_letter("z").as_deref(), Some("Z"));
        assert_eq!(seg.letter_index("E"), Some(1));
        assert_eq!(seg.letter_index("B"), Some(5));
        assert!(seg.is_punctuation("'"));
        assert!(!seg.is_punctuation("!"));
    }

    #[test]
    fn test_custom_classifier_is_used() {
        struct Upper;
        impl CharClassifier for Upper {
            fn next_unit(&self, text: &str) -> GraphemeUnit {
                let c = text.chars().next().unwrap_or(' ');
                let mut unit = UnicodeClassifier::classify(c);
                unit.upper = "A".to_string();
                unit
            }
            fn name(&self) -> &'static str {
                "upper"
            }
        }

        let profile = LanguageProfile::builtin("English").unwrap();
        let seg = GraphemeSegmenter::with_classifier(profile, Arc::new(Upper)).unwrap();
        assert_eq!(seg.str_letters_of("xyz"), "AAA");
        assert!(format!("{seg:?}").contains("upper"));
    }

    #[test]
    fn test_unrecognized_runs() {
        let seg = segmenter("Phonetics");
        assert_eq!(seg.unrecognized_runs("B AH0 N AE1 N AH0"), Vec::<String>::new());
        assert_eq!(seg.unrecognized_runs("R EH D"), Vec::<String>::new());
        assert_eq!(seg.unrecognized_runs("ʃ%t Q"), vec!["%", "Q"]);
        assert_eq!(seg.unrecognized_runs("ʔʏ b"), vec!["ʔʏ"]);
    }
}
