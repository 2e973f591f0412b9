//! Text analysis module for lexindex.
//!
//! This module turns raw text into language-aware parts: normalization,
//! conversion and space mapping char filters run first, a [`CharClassifier`] splits the
//! result into grapheme units, and the [`GraphemeSegmenter`] composes those
//! units into the letters of a [`LanguageProfile`].

pub mod char_filter;
pub mod classifier;
pub mod part;
pub mod profile;
pub mod segmenter;

// Re-export commonly used types
pub use char_filter::CharFilter;
pub use char_filter::mapping::MappingCharFilter;
pub use char_filter::unicode_normalize::{NormalizationForm, UnicodeNormalizationCharFilter};
pub use classifier::{CharClassifier, GraphemeUnit, LetterCase, Script, UnicodeClassifier};
pub use part::{Part, PartKind};
pub use profile::LanguageProfile;
pub use segmenter::{GraphemeSegmenter, Segmentation};
