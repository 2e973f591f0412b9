//! Reading lexicon sources and splitting lines into fields.
//!
//! A lexicon line is either `<phrase>` or `<importance>\t<phrase>`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{LexIndexError, Result};

/// The fields of one lexicon line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEntry<'a> {
    /// Present only for `<importance>\t<phrase>` lines.
    pub importance: Option<f64>,

    pub phrase: &'a str,
}

/// Open a source file, or stdin when `path` is `-`.
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|e| LexIndexError::source_unavailable(path, e))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Read all lines, replacing invalid UTF-8 and stripping line terminators.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for chunk in reader.split(b'\n') {
        let chunk = chunk?;
        let mut line = String::from_utf8_lossy(&chunk).into_owned();
        if line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Split a lexicon line into an optional importance and a phrase.
///
/// `line_no` is 1-based and only used in error messages.
pub fn parse_line(line_no: usize, line: &str) -> Result<RawEntry<'_>> {
    let fields: Vec<&str> = line.split('\t').collect();
    match *fields.as_slice() {
        [phrase] => Ok(RawEntry {
            importance: None,
            phrase,
        }),
        [score, phrase] => {
            let importance: f64 = score.trim().parse().map_err(|_| {
                LexIndexError::malformed_line(line_no, format!("invalid importance '{score}'"))
            })?;
            if !importance.is_finite() {
                return Err(LexIndexError::malformed_line(
                    line_no,
                    format!("importance '{score}' is not finite"),
                ));
            }
            if importance < 0.0 {
                return Err(LexIndexError::malformed_line(
                    line_no,
                    format!("importance '{score}' is negative"),
                ));
            }
            Ok(RawEntry {
                importance: Some(importance),
                phrase,
            })
        }
        _ => Err(LexIndexError::malformed_line(
            line_no,
            format!("expected 1 or 2 tab-separated fields, found {}", fields.len()),
        )),
    }
}
