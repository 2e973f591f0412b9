//! Char filters applied to raw text before it is split into units.
//!
//! # Available Filters
//!
//! - [`mapping::MappingCharFilter`] - multi-unit to multi-unit replacement,
//!   used both for a profile's conversion table and for mapping alternate
//!   space sequences to a plain space.
//! - [`unicode_normalize::UnicodeNormalizationCharFilter`] - Unicode
//!   normalization (NFC by default), so decomposed and precomposed accents
//!   segment the same way.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use lexindex::analysis::char_filter::CharFilter;
//! use lexindex::analysis::char_filter::mapping::MappingCharFilter;
//!
//! let mut table = BTreeMap::new();
//! table.insert("\u{2019}".to_string(), "'".to_string());
//! let filter = MappingCharFilter::new(&table).unwrap();
//! assert_eq!(filter.filter("don\u{2019}t"), "don't");
//! ```

/// Trait for character filters that transform text before segmentation.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod mapping;
pub mod unicode_normalize;
