//! Builds a [`Lexicon`] from raw phrase lines.
//!
//! Lines are segmented independently (in parallel when configured), then
//! merged sequentially in input order so that record order, form sets and
//! tie-breaking never depend on scheduling.

use std::io::BufRead;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;

use crate::analysis::segmenter::GraphemeSegmenter;
use crate::error::{LexIndexError, Result};
use crate::lexicon::config::LexiconConfig;
use crate::lexicon::reader::{parse_line, read_lines};
use crate::lexicon::record::{Lexicon, PhraseRecord};
use crate::lexicon::report::SkipReport;

/// A lexicon together with the lines skipped while building it.
#[derive(Debug, Clone)]
pub struct LexiconBuild {
    pub lexicon: Lexicon,
    pub report: SkipReport,
}

/// A line that passed every per-line check.
#[derive(Debug, Clone)]
struct Entry {
    importance: f64,
    surface: String,
    normalized: String,
    letters: Vec<String>,
}

/// Result of analyzing one non-blank line.
#[derive(Debug)]
struct AnalyzedLine {
    /// Whether the line carried an importance; `None` when malformed.
    scored: Option<bool>,
    outcome: Result<Entry>,
}

/// Builds canonical lexicons for one language profile.
pub struct LexiconBuilder<'a> {
    segmenter: &'a GraphemeSegmenter,
    config: LexiconConfig,
    exclusions: AHashSet<String>,
}

impl<'a> LexiconBuilder<'a> {
    /// Create a builder.
    pub fn new(segmenter: &'a GraphemeSegmenter, config: LexiconConfig) -> Self {
        Self {
            segmenter,
            config,
            exclusions: AHashSet::new(),
        }
    }

    /// Exclude phrases whose canonical form matches one of `phrases`.
    pub fn with_exclusions<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let normalized = self
                .segmenter
                .str_letterized_pruned_parts_of(phrase.as_ref());
            if !normalized.is_empty() {
                self.exclusions.insert(normalized);
            }
        }
        self
    }

    /// Read exclusions from a source with one phrase per line.
    pub fn with_exclusions_from<R: BufRead>(self, reader: R) -> Result<Self> {
        let lines = read_lines(reader)?;
        Ok(self.with_exclusions(lines))
    }

    /// Number of distinct canonical exclusions.
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }

    /// Build a lexicon from a line source.
    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> Result<LexiconBuild> {
        let lines = read_lines(reader)?;
        self.build(&lines)
    }

    /// Build a lexicon from lines.
    ///
    /// Fails with a format error when some lines carry an importance and
    /// others do not. Other per-line problems skip the line and are counted
    /// in the returned [`SkipReport`].
    pub fn build<S: AsRef<str> + Sync>(&self, lines: &[S]) -> Result<LexiconBuild> {
        let analyzed: Vec<Option<AnalyzedLine>> = if self.config.parallel {
            lines
                .par_iter()
                .enumerate()
                .map(|(i, line)| self.analyze_line(i + 1, line.as_ref()))
                .collect()
        } else {
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| self.analyze_line(i + 1, line.as_ref()))
                .collect()
        };

        let scored = analyzed
            .iter()
            .flatten()
            .filter(|a| a.scored == Some(true))
            .count();
        let unscored = analyzed
            .iter()
            .flatten()
            .filter(|a| a.scored == Some(false))
            .count();
        log::info!(
            "Read {} lines: {scored} with importance, {unscored} without",
            lines.len()
        );
        if scored > 0 && unscored > 0 {
            return Err(LexIndexError::format(format!(
                "only {scored} of {} entries have an importance value; need all or none",
                scored + unscored
            )));
        }

        let mut lexicon = Lexicon::new(self.segmenter.profile());
        let mut report = SkipReport::default();
        let mut positions: AHashMap<String, usize> = AHashMap::new();
        positions.insert(String::new(), 0);

        for line in analyzed.into_iter().flatten() {
            let entry = match line.outcome {
                Ok(entry) => entry,
                Err(err) => {
                    report.record(&err);
                    continue;
                }
            };
            self.merge(&mut lexicon, &mut positions, entry);
        }
        report.log_summary();

        if scored > 0 {
            sort_by_importance(&mut lexicon.records);
        }
        adjust_sentinel(&mut lexicon.records);
        lexicon.assign_base_indices();

        log::info!(
            "Built lexicon: {} records, {} forms, {} letters",
            lexicon.len(),
            lexicon.total_forms(),
            lexicon.letters.len()
        );

        Ok(LexiconBuild { lexicon, report })
    }

    fn merge(&self, lexicon: &mut Lexicon, positions: &mut AHashMap<String, usize>, entry: Entry) {
        lexicon.letters.extend(entry.letters.iter().cloned());

        match positions.get(&entry.normalized) {
            Some(&pos) => {
                let record = &mut lexicon.records[pos];
                record.forms.insert(entry.surface);
                record.importance = record.importance.max(entry.importance);
            }
            None => {
                let pos = lexicon.records.len();
                positions.insert(entry.normalized.clone(), pos);
                lexicon.records.push(PhraseRecord::new(
                    entry.normalized,
                    entry.letters,
                    entry.surface,
                    entry.importance,
                ));
                let interval = self.config.progress_interval;
                if interval > 0 && pos % interval == 0 {
                    log::debug!("Lexicon at {pos}: {}", lexicon.records[pos].normalized);
                }
            }
        }
    }

    fn analyze_line(&self, line_no: usize, line: &str) -> Option<AnalyzedLine> {
        if line.trim().is_empty() {
            return None;
        }

        let raw = match parse_line(line_no, line) {
            Ok(raw) => raw,
            Err(err) => {
                return Some(AnalyzedLine {
                    scored: None,
                    outcome: Err(err),
                });
            }
        };

        Some(AnalyzedLine {
            scored: Some(raw.importance.is_some()),
            outcome: self.analyze_phrase(raw.phrase, raw.importance.unwrap_or(0.0)),
        })
    }

    fn analyze_phrase(&self, phrase: &str, importance: f64) -> Result<Entry> {
        let segmentation = self.segmenter.segment(phrase);
        if !segmentation.is_clean() {
            return Err(LexIndexError::unrecognized(phrase));
        }

        let letters = segmentation.letters();
        if letters.len() > self.config.max_entry_letters {
            return Err(LexIndexError::too_long(
                phrase,
                letters.len(),
                self.config.max_entry_letters,
            ));
        }

        let normalized = segmentation.normalized();
        if normalized.is_empty() {
            return Err(LexIndexError::unrecognized(phrase));
        }
        if self.exclusions.contains(&normalized) {
            return Err(LexIndexError::excluded(phrase));
        }

        Ok(Entry {
            importance,
            surface: segmentation.surface(),
            normalized,
            letters,
        })
    }
}

/// Stable sort of all records after the sentinel: importance descending,
/// then shorter canonical phrases first.
fn sort_by_importance(records: &mut [PhraseRecord]) {
    if let Some((_, rest)) = records.split_first_mut() {
        rest.sort_by(|a, b| {
            b.importance.total_cmp(&a.importance).then_with(|| {
                a.normalized
                    .chars()
                    .count()
                    .cmp(&b.normalized.chars().count())
            })
        });
    }
}

/// Make the sentinel outrank the best real record by at least 1.
fn adjust_sentinel(records: &mut [PhraseRecord]) {
    if records.len() < 2 {
        return;
    }
    let floor = records[1].importance + 1.0;
    let sentinel = &mut records[0];
    sentinel.importance = sentinel.importance.max(floor);
}
