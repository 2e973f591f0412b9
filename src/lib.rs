//! # lexindex
//!
//! Builds compact lookup structures over multi-script word and phrase lists
//! for pattern-based word games and solvers.
//!
//! ## Features
//!
//! - Language-aware grapheme segmentation with composed letters
//! - Canonical lexicon with merged surface forms and stable global indices
//! - Pruned wildcard pattern index (`C?T`, `???`, ...)
//! - Hash-sharded anagram and phonetic indexes with a cross-language hash
//! - Parallel map phases on rayon with deterministic output
//!
//! ## Example
//!
//! ```
//! use lexindex::analysis::{GraphemeSegmenter, LanguageProfile};
//! use lexindex::index::{IndexBuilder, IndexConfig};
//! use lexindex::lexicon::{LexiconBuilder, LexiconConfig};
//!
//! let segmenter = GraphemeSegmenter::new(LanguageProfile::builtin("English")?)?;
//! let build = LexiconBuilder::new(&segmenter, LexiconConfig::default())
//!     .build(&["5\tcat", "5\tCat", "3\tdog"])?;
//! let index = IndexBuilder::new(IndexConfig::default())?.build(&build.lexicon)?;
//!
//! let all_three: Vec<u32> = index.wildcard.get("???").unwrap().iter().copied().collect();
//! assert_eq!(all_three, vec![1, 2, 3]);
//! # Ok::<(), lexindex::error::LexIndexError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod index;
pub mod lexicon;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
