//! Segmentation parts.
//!
//! A [`Part`] is one element of a segmented phrase: a (possibly
//! multi-unit) letter, an allowed punctuation mark, a space, or a unit the
//! active profile does not recognize.
//!
//! # Examples
//!
//! ```
//! use lexindex::analysis::part::{Part, PartKind};
//!
//! let part = Part::letter("a", "A");
//! assert_eq!(part.text, "a");
//! assert_eq!(part.canonical, "A");
//! assert!(part.is_letter());
//!
//! assert_eq!(Part::space().kind, PartKind::Space);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    /// A letter of the active profile's alphabet.
    Letter,

    /// Punctuation allowed by the active profile.
    Punctuation,

    /// A single space.
    Space,

    /// Anything else.
    Unrecognized,
}

/// One element of a segmented phrase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    /// The surface text, in its original case.
    pub text: String,

    /// For letters, the uppercase alphabet form; otherwise equal to `text`.
    pub canonical: String,

    pub kind: PartKind,
}

impl Part {
    /// Create a letter part.
    pub fn letter<S: Into<String>, C: Into<String>>(text: S, canonical: C) -> Self {
        Part {
            text: text.into(),
            canonical: canonical.into(),
            kind: PartKind::Letter,
        }
    }

    /// Create a punctuation part.
    pub fn punctuation<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        Part {
            canonical: text.clone(),
            text,
            kind: PartKind::Punctuation,
        }
    }

    /// Create a space part.
    pub fn space() -> Self {
        Part {
            text: " ".to_string(),
            canonical: " ".to_string(),
            kind: PartKind::Space,
        }
    }

    /// Create an unrecognized part.
    pub fn unrecognized<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        Part {
            canonical: text.clone(),
            text,
            kind: PartKind::Unrecognized,
        }
    }

    pub fn is_letter(&self) -> bool {
        self.kind == PartKind::Letter
    }

    pub fn is_space(&self) -> bool {
        self.kind == PartKind::Space
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Collapse runs of spaces to one and drop leading/trailing spaces.
pub fn collapse_spaces(parts: Vec<Part>) -> Vec<Part> {
    let mut out: Vec<Part> = Vec::with_capacity(parts.len());
    for part in parts {
        if part.is_space() && out.last().is_none_or(Part::is_space) {
            continue;
        }
        out.push(part);
    }
    if out.last().is_some_and(Part::is_space) {
        out.pop();
    }
    out
}

/// Concatenate the surface text of parts.
pub fn join_text(parts: &[Part]) -> String {
    parts.iter().map(|p| p.text.as_str()).collect()
}
