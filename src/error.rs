//! Error types for the lexindex library.
//!
//! All errors are represented by the [`LexIndexError`] enum. Two families
//! exist side by side:
//!
//! - fatal errors (`Format`, `SourceUnavailable`, `Io`, `Profile`, `Config`)
//!   abort the whole build;
//! - per-line errors (`MalformedLine`, `UnrecognizedPhrase`,
//!   `ExclusionFiltered`, `TooLongEntry`) are reported on the diagnostic
//!   stream, counted, and the offending line is skipped.
//!
//! # Examples
//!
//! ```
//! use lexindex::error::{LexIndexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexIndexError::format("importance given on 3 of 5 lines"))
//! }
//!
//! let err = example_operation().unwrap_err();
//! assert!(!err.is_recoverable());
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for lexindex operations.
#[derive(Error, Debug)]
pub enum LexIndexError {
    /// I/O errors while reading sources or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A source file could not be opened.
    #[error("Source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Inconsistent input that invalidates the whole run.
    #[error("Format error: {0}")]
    Format(String),

    /// A line with the wrong number of fields or an unusable importance.
    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// A phrase containing content the active profile does not recognize.
    #[error("Unrecognized phrase: {0}")]
    UnrecognizedPhrase(String),

    /// A phrase whose canonical form is in the exclusion list.
    #[error("Excluded phrase: {0}")]
    ExclusionFiltered(String),

    /// A phrase with more letters than the configured maximum.
    #[error("Entry too long ({letters} letters, max {max}): {phrase}")]
    TooLongEntry {
        phrase: String,
        letters: usize,
        max: usize,
    },

    /// Invalid or unknown language profile.
    #[error("Profile error: {0}")]
    Profile(String),

    /// Invalid build configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LexIndexError.
pub type Result<T> = std::result::Result<T, LexIndexError>;

impl LexIndexError {
    /// Create a new format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        LexIndexError::Format(msg.into())
    }

    /// Create a new malformed-line error.
    pub fn malformed_line<S: Into<String>>(line: usize, reason: S) -> Self {
        LexIndexError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create a new unrecognized-phrase error.
    pub fn unrecognized<S: Into<String>>(phrase: S) -> Self {
        LexIndexError::UnrecognizedPhrase(phrase.into())
    }

    /// Create a new exclusion error.
    pub fn excluded<S: Into<String>>(phrase: S) -> Self {
        LexIndexError::ExclusionFiltered(phrase.into())
    }

    /// Create a new too-long-entry error.
    pub fn too_long<S: Into<String>>(phrase: S, letters: usize, max: usize) -> Self {
        LexIndexError::TooLongEntry {
            phrase: phrase.into(),
            letters,
            max,
        }
    }

    /// Create a new source-unavailable error.
    pub fn source_unavailable<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        LexIndexError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a new profile error.
    pub fn profile<S: Into<String>>(msg: S) -> Self {
        LexIndexError::Profile(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LexIndexError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LexIndexError::Other(msg.into())
    }

    /// Whether the error only affects a single input line.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LexIndexError::MalformedLine { .. }
                | LexIndexError::UnrecognizedPhrase(_)
                | LexIndexError::ExclusionFiltered(_)
                | LexIndexError::TooLongEntry { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LexIndexError::format("mixed importances");
        assert_eq!(error.to_string(), "Format error: mixed importances");

        let error = LexIndexError::malformed_line(7, "3 tab-separated fields");
        assert_eq!(error.to_string(), "Malformed line 7: 3 tab-separated fields");

        let error = LexIndexError::too_long("abc", 3, 2);
        assert_eq!(error.to_string(), "Entry too long (3 letters, max 2): abc");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(LexIndexError::unrecognized("x4").is_recoverable());
        assert!(LexIndexError::excluded("CAT").is_recoverable());
        assert!(LexIndexError::malformed_line(1, "empty").is_recoverable());
        assert!(!LexIndexError::format("mixed").is_recoverable());
        assert!(!LexIndexError::profile("unknown").is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = LexIndexError::from(io_error);

        match error {
            LexIndexError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
