//! Language profiles.
//!
//! A [`LanguageProfile`] describes everything the segmenter needs to know
//! about one language: its alphabet (vowels then consonants, which also
//! fixes the canonical letter order), the combining units that attach to a
//! base letter, allowed punctuation, alternate spaces and a conversion table
//! applied before segmentation.
//!
//! Profiles are plain values. Pick a built-in one by name or load one from
//! JSON; nothing is registered globally.
//!
//! # Examples
//!
//! ```
//! use lexindex::analysis::profile::LanguageProfile;
//!
//! let english = LanguageProfile::builtin("English").unwrap();
//! assert_eq!(english.language, "en");
//! assert_eq!(english.alphabet().count(), 26);
//! assert!(LanguageProfile::builtin("Klingon").is_err());
//! ```

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::unicode_normalize::NormalizationForm;
use crate::analysis::classifier::Script;
use crate::error::{LexIndexError, Result};

/// Maximum number of units composed into a single letter.
pub const MAX_LETTER_UNITS: usize = 8;

/// Names accepted by [`LanguageProfile::builtin`].
pub const BUILTIN_PROFILES: &[&str] = &[
    "Brazilian",
    "English",
    "French",
    "German",
    "Hindi",
    "Italian",
    "Marathi",
    "Phonetics",
    "Portuguese",
    "Spanish",
];

/// Per-language segmentation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Profile name, e.g. "English".
    pub name: String,

    /// Language code used in output identifiers, e.g. "en".
    pub language: String,

    pub script: Script,

    /// Unicode normalization applied before anything else.
    #[serde(default)]
    pub normalization: NormalizationForm,

    /// Uppercase vowel letters, in alphabet order.
    pub vowels: Vec<String>,

    /// Uppercase consonant letters, in alphabet order.
    pub consonants: Vec<String>,

    /// Units that attach to a preceding base letter.
    #[serde(default)]
    pub combiners: BTreeSet<String>,

    /// Punctuation kept in surface forms.
    #[serde(default)]
    pub punctuation: BTreeSet<String>,

    /// Alternate space sequences normalized to a single space.
    #[serde(default)]
    pub spaces: BTreeSet<String>,

    /// Replacements applied to raw text before segmentation.
    #[serde(default)]
    pub conversions: BTreeMap<String, String>,

    /// Separator used when joining phoneme symbols into a phonetic key.
    #[serde(default)]
    pub phoneme_separator: String,
}

impl LanguageProfile {
    /// Look up a built-in profile by (case-sensitive) name.
    pub fn builtin(name: &str) -> Result<Self> {
        let profile = match name {
            "English" => english(),
            "French" => french(),
            "German" => german(),
            "Spanish" => spanish(),
            "Italian" => italian(),
            "Portuguese" => portuguese("Portuguese", "pt"),
            "Brazilian" => portuguese("Brazilian", "pt-br"),
            "Hindi" => devanagari("Hindi", "hi", &[], &[]),
            "Marathi" => devanagari("Marathi", "mr", &["ॲ", "ऑ"], &["ळ"]),
            "Phonetics" => phonetics(),
            _ => {
                return Err(LexIndexError::profile(format!(
                    "Unknown profile '{name}', expected one of: {}",
                    BUILTIN_PROFILES.join(", ")
                )));
            }
        };
        Ok(profile)
    }

    /// Load a profile from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LexIndexError::source_unavailable(path, e))?;
        Self::from_json(&content)
    }

    /// Parse a profile from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: LanguageProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// All letters in canonical order: vowels, then consonants.
    pub fn alphabet(&self) -> impl Iterator<Item = &String> {
        self.vowels.iter().chain(self.consonants.iter())
    }

    /// Check the profile for inconsistencies.
    pub fn validate(&self) -> Result<()> {
        if self.vowels.is_empty() && self.consonants.is_empty() {
            return Err(LexIndexError::profile(format!(
                "Profile '{}' has no letters",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for letter in self.alphabet() {
            if letter.is_empty() {
                return Err(LexIndexError::profile(format!(
                    "Profile '{}' has an empty letter",
                    self.name
                )));
            }
            if !seen.insert(letter.as_str()) {
                return Err(LexIndexError::profile(format!(
                    "Profile '{}' lists letter '{letter}' twice",
                    self.name
                )));
            }
            if self.combiners.contains(letter) {
                return Err(LexIndexError::profile(format!(
                    "Profile '{}' lists '{letter}' as both a letter and a combiner",
                    self.name
                )));
            }
        }

        if self.conversions.keys().any(String::is_empty) {
            return Err(LexIndexError::profile(format!(
                "Profile '{}' has a conversion with an empty source",
                self.name
            )));
        }

        Ok(())
    }
}

fn split(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn latin_spaces() -> BTreeSet<String> {
    set(&["\t", "\u{00A0}", "\u{2002}", "\u{2003}", "\u{2009}", "\u{202F}"])
}

fn latin_conversions() -> Vec<(&'static str, &'static str)> {
    vec![
        ("\u{2018}", "'"),
        ("\u{2019}", "'"),
        ("\u{02BC}", "'"),
        ("\u{2010}", "-"),
        ("\u{2011}", "-"),
        ("\u{2013}", "-"),
    ]
}

fn latin(name: &str, language: &str, vowels: &str, consonants: &str) -> LanguageProfile {
    LanguageProfile {
        name: name.to_string(),
        language: language.to_string(),
        script: Script::Latin,
        normalization: NormalizationForm::NFC,
        vowels: split(vowels),
        consonants: split(consonants),
        combiners: BTreeSet::new(),
        punctuation: set(&["-", "'"]),
        spaces: latin_spaces(),
        conversions: map(&latin_conversions()),
        phoneme_separator: String::new(),
    }
}

const LATIN_VOWELS: &str = "A E I O U";
const LATIN_CONSONANTS: &str = "B C D F G H J K L M N P Q R S T V W X Y Z";

fn english() -> LanguageProfile {
    latin("English", "en", LATIN_VOWELS, LATIN_CONSONANTS)
}

fn french() -> LanguageProfile {
    let mut profile = latin("French", "fr", LATIN_VOWELS, LATIN_CONSONANTS);
    profile
        .conversions
        .extend(map(&[("Œ", "OE"), ("œ", "oe"), ("Æ", "AE"), ("æ", "ae")]));
    profile
}

fn german() -> LanguageProfile {
    let mut profile = latin("German", "de", LATIN_VOWELS, LATIN_CONSONANTS);
    profile.conversions.extend(map(&[
        ("Ä", "AE"),
        ("ä", "ae"),
        ("Ö", "OE"),
        ("ö", "oe"),
        ("Ü", "UE"),
        ("ü", "ue"),
        ("ß", "ss"),
        ("ẞ", "SS"),
    ]));
    profile
}

fn spanish() -> LanguageProfile {
    latin(
        "Spanish",
        "es",
        LATIN_VOWELS,
        "B C D F G H J K L M N Ñ P Q R S T V W X Y Z",
    )
}

fn italian() -> LanguageProfile {
    latin("Italian", "it", LATIN_VOWELS, LATIN_CONSONANTS)
}

fn portuguese(name: &str, language: &str) -> LanguageProfile {
    latin(name, language, LATIN_VOWELS, LATIN_CONSONANTS)
}

fn devanagari(
    name: &str,
    language: &str,
    extra_vowels: &[&str],
    extra_consonants: &[&str],
) -> LanguageProfile {
    let mut vowels = split("अ आ इ ई उ ऊ ऋ ए ऐ ओ औ");
    vowels.extend(extra_vowels.iter().map(|s| s.to_string()));
    let mut consonants = split(
        "क ख ग घ ङ च छ ज झ ञ ट ठ ड ढ ण त थ द ध न प फ ब भ म य र ल व श ष स ह",
    );
    consonants.extend(extra_consonants.iter().map(|s| s.to_string()));

    LanguageProfile {
        name: name.to_string(),
        language: language.to_string(),
        script: Script::Devanagari,
        normalization: NormalizationForm::NFC,
        vowels,
        consonants,
        combiners: set(&[
            "\u{093C}", // nukta
            "\u{093E}", "\u{093F}", "\u{0940}", "\u{0941}", "\u{0942}", "\u{0943}", "\u{0945}",
            "\u{0947}", "\u{0948}", "\u{0949}", "\u{094B}", "\u{094C}",
            "\u{094D}", // virama
            "\u{0901}", "\u{0902}", "\u{0903}",
        ]),
        punctuation: set(&["-"]),
        spaces: set(&["\t", "\u{00A0}", "\u{200B}"]),
        conversions: map(&[
            ("\u{0958}", "\u{0915}\u{093C}"),
            ("\u{0959}", "\u{0916}\u{093C}"),
            ("\u{095A}", "\u{0917}\u{093C}"),
            ("\u{095B}", "\u{091C}\u{093C}"),
            ("\u{095C}", "\u{0921}\u{093C}"),
            ("\u{095D}", "\u{0922}\u{093C}"),
            ("\u{095E}", "\u{092B}\u{093C}"),
            ("\u{095F}", "\u{092F}\u{093C}"),
            ("\u{0929}", "\u{0928}\u{093C}"),
            ("\u{0931}", "\u{0930}\u{093C}"),
            ("\u{0934}", "\u{0933}\u{093C}"),
        ]),
        phoneme_separator: String::new(),
    }
}

/// IPA symbols and the ARPAbet phoneme each one is read as. Longer
/// sequences win, so `tʃ` is one phoneme and not `t` + `ʃ`.
const IPA_PHONEMES: &[(&str, &str)] = &[
    // Vowels and diphthongs
    ("i", "IY"),
    ("ɪ", "IH"),
    ("e", "EY"),
    ("eɪ", "EY"),
    ("ɛ", "EH"),
    ("æ", "AE"),
    ("a", "AA"),
    ("ɑ", "AA"),
    ("ɒ", "AA"),
    ("ɔ", "AO"),
    ("o", "OW"),
    ("oʊ", "OW"),
    ("əʊ", "OW"),
    ("ʊ", "UH"),
    ("u", "UW"),
    ("ʌ", "AH"),
    ("ə", "AH"),
    ("ɐ", "AH"),
    ("ɜ", "ER"),
    ("ɝ", "ER"),
    ("ɚ", "ER"),
    ("aɪ", "AY"),
    ("aʊ", "AW"),
    ("ɔɪ", "OY"),
    // Consonants
    ("b", "B"),
    ("tʃ", "CH"),
    ("t͡ʃ", "CH"),
    ("d", "D"),
    ("ð", "DH"),
    ("f", "F"),
    ("g", "G"),
    ("ɡ", "G"),
    ("h", "HH"),
    ("dʒ", "JH"),
    ("d͡ʒ", "JH"),
    ("k", "K"),
    ("l", "L"),
    ("ɫ", "L"),
    ("m", "M"),
    ("n", "N"),
    ("ŋ", "NG"),
    ("p", "P"),
    ("r", "R"),
    ("ɹ", "R"),
    ("ɾ", "T"),
    ("s", "S"),
    ("ʃ", "SH"),
    ("t", "T"),
    ("θ", "TH"),
    ("v", "V"),
    ("w", "W"),
    ("ʍ", "W"),
    ("j", "Y"),
    ("z", "Z"),
    ("ʒ", "ZH"),
];

/// Stress, length, syllable and aspiration marks. They carry no phoneme.
const PHONETIC_MARKS: &[&str] = &[
    "0", "1", "2", "ˈ", "ˌ", "ː", "ˑ", ".", "ʰ", "\u{0329}", "\u{030D}",
];

/// ARPAbet phonemes, as used by CMUdict-style pronunciation files.
///
/// Lowercase IPA transcriptions are accepted too: each IPA symbol is
/// converted to its ARPAbet phoneme before segmentation, so both notations
/// produce the same phonetic keys. ARPAbet input is expected in uppercase.
fn phonetics() -> LanguageProfile {
    let mut conversions: BTreeMap<String, String> = IPA_PHONEMES
        .iter()
        .map(|(ipa, arpabet)| (ipa.to_string(), format!(" {arpabet} ")))
        .collect();
    conversions.extend(PHONETIC_MARKS.iter().map(|m| (m.to_string(), String::new())));

    LanguageProfile {
        name: "Phonetics".to_string(),
        language: "phonetics".to_string(),
        script: Script::Latin,
        normalization: NormalizationForm::NFC,
        vowels: split("AA AE AH AO AW AY EH ER EY IH IY OW OY UH UW"),
        consonants: split(
            "B CH D DH F G HH JH K L M N NG P R S SH T TH V W Y Z ZH",
        ),
        combiners: BTreeSet::new(),
        punctuation: BTreeSet::new(),
        spaces: set(&["\t"]),
        conversions,
        phoneme_separator: String::new(),
    }
}
