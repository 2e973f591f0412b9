//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{LexIndexArgs, OutputFormat};
use crate::error::Result;
use crate::lexicon::pronunciation::PronunciationStats;
use crate::lexicon::report::SkipReport;

/// Result structure for a build written to a file.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildSummary {
    pub output: String,
    pub records: usize,
    pub forms: usize,
    pub letters: usize,
    pub skipped: SkipReport,
    pub pronunciations: Option<PronunciationStats>,
    pub wildcard_keys: usize,
    pub anagram_postings: usize,
    pub phonetic_postings: usize,
    pub duration_ms: u64,
}

/// Result structure for one segmented text.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentResult {
    pub text: String,
    pub parts: Vec<String>,
    pub pruned: String,
    pub normalized: String,
    pub letters: Vec<String>,
}

/// Result structure for one looked-up global index.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShowResult {
    pub index: u32,
    pub found: bool,
    pub form: Option<String>,
    pub normalized: Option<String>,
    pub importance: Option<f64>,
    pub forms: Vec<String>,
    pub phonemes: Vec<Vec<String>>,
}

/// A run of text the phonetic profile does not recognize.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhoneticIssue {
    pub line: usize,
    pub text: String,
    pub code_points: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LexIndexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &LexIndexArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print_human_value(&value, 0);
    Ok(())
}

/// Print a JSON value as indented `key: value` lines.
fn print_human_value(value: &serde_json::Value, indent: usize) {
    let spaces = "  ".repeat(indent);

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(inner) if !inner.is_empty() => {
                        println!("{spaces}{key}:");
                        print_human_value(val, indent + 1);
                    }
                    _ => {
                        let formatted_val = format_value(val);
                        println!("{spaces}{key}: {formatted_val}");
                    }
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                print_human_value(item, indent);
                println!();
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{spaces}{formatted_value}");
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexIndexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            let formatted_values = obj
                .iter()
                .map(|(k, v)| format!("{k}={}", format_value(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{formatted_values}}}")
        }
        serde_json::Value::Null => "-".to_string(),
    }
}

/// Format code points as `U+XXXX`.
pub fn code_points(text: &str) -> Vec<String> {
    text.chars().map(|c| format!("U+{:04X}", c as u32)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("cat")), "cat");
        assert_eq!(format_value(&json!([1, 2, 3])), "[1, 2, 3]");
        assert_eq!(format_value(&json!([["R", "EH", "D"]])), "[[R, EH, D]]");
        assert_eq!(format_value(&json!({"a": 1})), "{a=1}");
        assert_eq!(format_value(&json!(null)), "-");
    }

    #[test]
    fn test_code_points() {
        assert_eq!(code_points("aʃ"), vec!["U+0061", "U+0283"]);
        assert_eq!(code_points("\u{1F600}"), vec!["U+1F600"]);
    }
}
