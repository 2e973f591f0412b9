//! Accounting for recoverable per-line errors.

use serde::{Deserialize, Serialize};

use crate::error::LexIndexError;

/// Maximum number of sample messages kept per report.
pub const MAX_SAMPLES: usize = 20;

/// Counts of skipped lines by reason, plus a few sample messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipReport {
    pub malformed: usize,
    pub unrecognized: usize,
    pub excluded: usize,
    pub too_long: usize,

    /// The first [`MAX_SAMPLES`] skip messages.
    pub samples: Vec<String>,
}

impl SkipReport {
    /// Record a recoverable error. Fatal errors are not counted.
    pub fn record(&mut self, error: &LexIndexError) {
        match error {
            LexIndexError::MalformedLine { .. } => self.malformed += 1,
            LexIndexError::UnrecognizedPhrase(_) => self.unrecognized += 1,
            LexIndexError::ExclusionFiltered(_) => self.excluded += 1,
            LexIndexError::TooLongEntry { .. } => self.too_long += 1,
            _ => return,
        }
        log::debug!("Skipping: {error}");
        if self.samples.len() < MAX_SAMPLES {
            self.samples.push(error.to_string());
        }
    }

    /// Total number of skipped lines.
    pub fn total(&self) -> usize {
        self.malformed + self.unrecognized + self.excluded + self.too_long
    }

    /// One-line description of the skipped lines, if there were any.
    pub fn summary(&self) -> Option<String> {
        if self.total() == 0 {
            return None;
        }
        Some(format!(
            "Skipped {} lines: {} malformed, {} unrecognized, {} excluded, {} too long",
            self.total(),
            self.malformed,
            self.unrecognized,
            self.excluded,
            self.too_long
        ))
    }

    /// Warn about skipped lines on the diagnostic stream, followed by the
    /// sample messages at info level.
    pub fn log_summary(&self) {
        let Some(summary) = self.summary() else {
            return;
        };
        log::warn!("{summary} (use -vv to list them)");
        for sample in &self.samples {
            log::info!("  {sample}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_by_kind() {
        let mut report = SkipReport::default();
        report.record(&LexIndexError::malformed_line(1, "three fields"));
        report.record(&LexIndexError::unrecognized("R2D2"));
        report.record(&LexIndexError::unrecognized("C3PO"));
        report.record(&LexIndexError::excluded("CAT"));
        report.record(&LexIndexError::too_long("x", 31, 30));
        report.record(&LexIndexError::format("not counted"));

        assert_eq!(report.malformed, 1);
        assert_eq!(report.unrecognized, 2);
        assert_eq!(report.excluded, 1);
        assert_eq!(report.too_long, 1);
        assert_eq!(report.total(), 5);
        assert_eq!(report.samples.len(), 5);
    }

    #[test]
    fn test_samples_are_bounded() {
        let mut report = SkipReport::default();
        for i in 0..(MAX_SAMPLES + 5) {
            report.record(&LexIndexError::unrecognized(format!("p{i}")));
        }
        assert_eq!(report.samples.len(), MAX_SAMPLES);
        assert_eq!(report.unrecognized, MAX_SAMPLES + 5);
    }

    #[test]
    fn test_summary_only_when_lines_were_skipped() {
        let mut report = SkipReport::default();
        assert_eq!(report.summary(), None);

        report.record(&LexIndexError::unrecognized("R2D2"));
        report.record(&LexIndexError::malformed_line(3, "three fields"));
        assert_eq!(
            report.summary().as_deref(),
            Some("Skipped 2 lines: 1 malformed, 1 unrecognized, 0 excluded, 0 too long")
        );
    }
}
