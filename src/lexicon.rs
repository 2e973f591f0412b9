//! Canonical lexicon construction.
//!
//! Raw phrase lines are segmented, canonicalized and merged into
//! [`PhraseRecord`]s. Every surface variant of a canonical phrase becomes a
//! separately addressable form with its own global index; index 0 is always
//! the empty sentinel phrase.

pub mod builder;
pub mod config;
pub mod pronunciation;
pub mod reader;
pub mod record;
pub mod report;

// Re-export commonly used types
pub use builder::{LexiconBuild, LexiconBuilder};
pub use config::LexiconConfig;
pub use pronunciation::{PronunciationStats, add_pronunciations};
pub use reader::open_source;
pub use record::{Lexicon, PhraseRecord};
pub use report::SkipReport;
