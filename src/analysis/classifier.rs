//! Character classification.
//!
//! The segmenter never inspects raw code points itself. It asks a
//! [`CharClassifier`] to cut the text into [`GraphemeUnit`]s and to describe
//! each one: which script it belongs to, whether it can be part of a letter,
//! its case, its upper/lower forms and an optional diacritic-stripped
//! fallback.
//!
//! [`UnicodeClassifier`] is the default implementation. It derives every
//! attribute from Unicode properties instead of a hand-maintained table.
//!
//! # Examples
//!
//! ```
//! use lexindex::analysis::classifier::{CharClassifier, LetterCase, Script, UnicodeClassifier};
//!
//! let classifier = UnicodeClassifier::new();
//! let units = classifier.units("Été");
//! assert_eq!(units.len(), 3);
//! assert_eq!(units[0].script, Script::Latin);
//! assert_eq!(units[0].case, LetterCase::Upper);
//! assert_eq!(units[0].fallback.as_deref(), Some("E"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Writing systems known to the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Script {
    /// Digits, punctuation, spaces, symbols and anything unlisted.
    Common,
    Latin,
    Cyrillic,
    Greek,
    Devanagari,
    Bengali,
    Gujarati,
    Gurmukhi,
    Kannada,
    Malayalam,
    Sinhala,
    Tamil,
    Telugu,
    Oriya,
}

impl Script {
    /// Determine the script of a single code point.
    pub fn of(c: char) -> Self {
        match c as u32 {
            0x0041..=0x005A | 0x0061..=0x007A => Script::Latin,
            0x00C0..=0x00D6 | 0x00D8..=0x00F6 | 0x00F8..=0x024F => Script::Latin,
            0x0250..=0x02AF | 0x1D00..=0x1D7F | 0x1E00..=0x1EFF => Script::Latin,
            0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
            0x0400..=0x052F => Script::Cyrillic,
            0x0900..=0x097F | 0xA8E0..=0xA8FF => Script::Devanagari,
            0x0980..=0x09FF => Script::Bengali,
            0x0A00..=0x0A7F => Script::Gurmukhi,
            0x0A80..=0x0AFF => Script::Gujarati,
            0x0B00..=0x0B7F => Script::Oriya,
            0x0B80..=0x0BFF => Script::Tamil,
            0x0C00..=0x0C7F => Script::Telugu,
            0x0C80..=0x0CFF => Script::Kannada,
            0x0D00..=0x0D7F => Script::Malayalam,
            0x0D80..=0x0DFF => Script::Sinhala,
            _ => Script::Common,
        }
    }

    /// Human-readable script name.
    pub fn name(&self) -> &'static str {
        match self {
            Script::Common => "Common",
            Script::Latin => "Latin",
            Script::Cyrillic => "Cyrillic",
            Script::Greek => "Greek",
            Script::Devanagari => "Devanagari",
            Script::Bengali => "Bengali",
            Script::Gujarati => "Gujarati",
            Script::Gurmukhi => "Gurmukhi",
            Script::Kannada => "Kannada",
            Script::Malayalam => "Malayalam",
            Script::Sinhala => "Sinhala",
            Script::Tamil => "Tamil",
            Script::Telugu => "Telugu",
            Script::Oriya => "Oriya",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Letter case of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterCase {
    None,
    Lower,
    Upper,
}

/// An atomic recognized text unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphemeUnit {
    /// The unit exactly as it appears in the text.
    pub text: String,

    pub script: Script,

    /// Whether the unit can be (part of) a letter.
    pub is_letter: bool,

    pub case: LetterCase,

    /// Name shared by the upper and lower case variants.
    pub root: String,

    /// The unit with diacritics removed, when that differs from `text`.
    pub fallback: Option<String>,

    pub upper: String,

    pub lower: String,
}

impl GraphemeUnit {
    /// Byte length of the unit in the source text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Maps text to grapheme units.
///
/// Implementations must be pure: the same input always yields the same
/// units.
pub trait CharClassifier: Send + Sync {
    /// Return the longest recognized unit at the start of `text`.
    ///
    /// `text` is never empty. Unknown input still yields a unit (typically
    /// one code point) so that segmentation always makes progress.
    fn next_unit(&self, text: &str) -> GraphemeUnit;

    /// Split `text` into consecutive units.
    fn units(&self, text: &str) -> Vec<GraphemeUnit> {
        let mut units = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let unit = self.next_unit(rest);
            let len = match unit.len() {
                0 => rest.chars().next().map_or(rest.len(), char::len_utf8),
                n => n.min(rest.len()),
            };
            rest = &rest[len..];
            units.push(unit);
        }
        units
    }

    /// Get the name of this classifier.
    fn name(&self) -> &'static str;
}

/// A classifier that treats every code point as one unit and derives its
/// attributes from Unicode properties.
#[derive(Clone, Debug, Default)]
pub struct UnicodeClassifier;

impl UnicodeClassifier {
    /// Create a new Unicode classifier.
    pub fn new() -> Self {
        UnicodeClassifier
    }

    /// Classify a single code point.
    pub fn classify(c: char) -> GraphemeUnit {
        let text = c.to_string();
        let upper = single_mapping(c, c.to_uppercase());
        let lower = single_mapping(c, c.to_lowercase());
        let case = if c.is_uppercase() {
            LetterCase::Upper
        } else if c.is_lowercase() {
            LetterCase::Lower
        } else {
            LetterCase::None
        };

        GraphemeUnit {
            script: Script::of(c),
            is_letter: c.is_alphabetic() || is_combining_mark(c),
            case,
            root: lower.clone(),
            fallback: strip_diacritics(c),
            upper,
            lower,
            text,
        }
    }
}

impl CharClassifier for UnicodeClassifier {
    fn next_unit(&self, text: &str) -> GraphemeUnit {
        match text.chars().next() {
            Some(c) => Self::classify(c),
            None => Self::classify('\u{FFFD}'),
        }
    }

    fn name(&self) -> &'static str {
        "unicode"
    }
}

/// Case mappings that expand to several code points (e.g. `ß` -> `SS`) would
/// change the unit count, so those units keep their original form.
fn single_mapping(c: char, mut mapped: impl Iterator<Item = char>) -> String {
    match (mapped.next(), mapped.next()) {
        (Some(m), None) => m.to_string(),
        _ => c.to_string(),
    }
}

fn strip_diacritics(c: char) -> Option<String> {
    let stripped: Vec<char> = std::iter::once(c)
        .nfd()
        .filter(|d| !is_combining_mark(*d))
        .collect();
    match stripped.as_slice() {
        [base] if *base != c => Some(base.to_string()),
        _ => None,
    }
}
