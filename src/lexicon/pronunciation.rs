//! Attaching pronunciations to lexicon records.
//!
//! Each line of a pronunciation source holds a phrase, a separator (a tab or
//! two or more spaces) and a phoneme sequence, in the style of CMUdict:
//!
//! ```text
//! BANANA  B AH0 N AE1 N AH0
//! READ(1)  R EH1 D
//! ```
//!
//! A `(N)` homograph suffix is removed from the phrase, and the phonemes are
//! segmented with a phonetic profile, which drops stress digits. Phonemes
//! may also be written in IPA (`BANANA  bəˈnænə`).
//!
//! A pronunciation containing symbols the phonetic profile does not know is
//! skipped and counted rather than attached in shortened form.

use std::io::BufRead;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::segmenter::GraphemeSegmenter;
use crate::error::{LexIndexError, Result};
use crate::lexicon::reader::read_lines;
use crate::lexicon::record::Lexicon;

/// Summary of a pronunciation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PronunciationStats {
    /// Non-blank lines read.
    pub total: usize,

    /// Lines whose pronunciation was attached to a record.
    pub used: usize,

    /// Lines without a phrase/phoneme separator.
    pub malformed: usize,

    /// Lines for a known phrase with no recognizable phonemes.
    pub empty: usize,

    /// Lines for a known phrase whose phonemes contain unknown symbols.
    pub unrecognized: usize,

    /// Longest phoneme sequence attached.
    pub max_len: usize,

    /// Mean length of attached phoneme sequences.
    pub average_len: f64,
}

/// Splits pronunciation lines into phrase and phoneme text.
#[derive(Debug, Clone)]
pub struct PronunciationParser {
    line: Regex,
    homograph: Regex,
}

impl PronunciationParser {
    /// Create a new parser.
    pub fn new() -> Result<Self> {
        let line = Regex::new(r"^(.*?\S)(?:\t+|\s{2,})(\S.*?)\s*$").map_err(|e| {
            LexIndexError::other(format!("Invalid pronunciation pattern: {e}"))
        })?;
        let homograph = Regex::new(r"\(\d+\)\s*$").map_err(|e| {
            LexIndexError::other(format!("Invalid homograph pattern: {e}"))
        })?;
        Ok(Self { line, homograph })
    }

    /// Split a line into `(phrase, phonemes)`, stripping any homograph suffix.
    pub fn split<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let captures = self.line.captures(line)?;
        let phrase = captures.get(1)?.as_str();
        let phones = captures.get(2)?.as_str();
        let phrase = match self.homograph.find(phrase) {
            Some(m) => phrase[..m.start()].trim_end(),
            None => phrase,
        };
        Some((phrase, phones))
    }
}

/// Read pronunciations and attach them to matching lexicon records.
///
/// `segmenter` canonicalizes phrases the same way the lexicon was built;
/// `phonetic` segments the phoneme text. Lines for phrases not in the
/// lexicon are ignored.
pub fn add_pronunciations<R: BufRead>(
    reader: R,
    segmenter: &GraphemeSegmenter,
    phonetic: &GraphemeSegmenter,
    lexicon: &mut Lexicon,
) -> Result<PronunciationStats> {
    let parser = PronunciationParser::new()?;
    let lines = read_lines(reader)?;
    let positions: ahash::AHashMap<String, usize> = lexicon
        .positions_by_normalized()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    let mut stats = PronunciationStats::default();
    let mut total_len = 0usize;

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        stats.total += 1;

        let Some((phrase, phones)) = parser.split(line) else {
            stats.malformed += 1;
            log::debug!("{}", LexIndexError::malformed_line(i + 1, "no phoneme separator"));
            continue;
        };

        let normalized = segmenter.str_letterized_pruned_parts_of(phrase);
        if normalized.is_empty() {
            continue;
        }
        let Some(&pos) = positions.get(&normalized) else {
            continue;
        };

        let segmentation = phonetic.segment(phones);
        if !segmentation.is_clean() {
            stats.unrecognized += 1;
            log::debug!(
                "Line {}: {}",
                i + 1,
                LexIndexError::unrecognized(phones)
            );
            continue;
        }
        let phonemes = segmentation.letters();
        if phonemes.is_empty() {
            stats.empty += 1;
            log::debug!("Empty pronunciation on line {}: {line}", i + 1);
            continue;
        }

        if stats.used % 100 == 0 {
            log::debug!("Added pronunciation [{}] for {normalized}", phonemes.join(" "));
        }
        stats.used += 1;
        total_len += phonemes.len();
        stats.max_len = stats.max_len.max(phonemes.len());
        lexicon.records[pos].phonemes.insert(phonemes);
    }

    if stats.used > 0 {
        stats.average_len = total_len as f64 / stats.used as f64;
    }
    log::info!(
        "Read pronunciations: used {} of {}, max length {}, average {:.2}",
        stats.used,
        stats.total,
        stats.max_len,
        stats.average_len
    );
    if let Some(summary) = stats.skip_summary() {
        log::warn!("{summary}");
    }
    Ok(stats)
}

impl PronunciationStats {
    /// Lines that named a phrase but were not attached.
    pub fn skipped(&self) -> usize {
        self.malformed + self.empty + self.unrecognized
    }

    /// One-line description of the skipped lines, if there were any.
    pub fn skip_summary(&self) -> Option<String> {
        if self.skipped() == 0 {
            return None;
        }
        Some(format!(
            "Skipped {} pronunciation lines: {} malformed, {} empty, {} unrecognized",
            self.skipped(),
            self.malformed,
            self.empty,
            self.unrecognized
        ))
    }
}
