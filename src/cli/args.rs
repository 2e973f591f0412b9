//! Command line argument parsing for the lexindex CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::analysis::profile::LanguageProfile;
use crate::error::Result;

/// lexindex - build wildcard, anagram and phonetic indexes over word lists
#[derive(Parser, Debug, Clone)]
#[command(name = "lexindex")]
#[command(about = "Build wildcard, anagram and phonetic indexes over word lists")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexIndexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexIndexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the diagnostic stream. Skipped-line summaries are
    /// warnings, so they show at the default verbosity.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a lexicon and its indexes
    Build(BuildArgs),

    /// Show how text is segmented
    Segment(SegmentArgs),

    /// Show the records owning global indices
    Show(ShowArgs),

    /// Report text the phonetic profile does not recognize
    #[command(name = "check-phonetics")]
    CheckPhonetics(CheckPhoneticsArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Build(_) => "build",
            Command::Segment(_) => "segment",
            Command::Show(_) => "show",
            Command::CheckPhonetics(_) => "check-phonetics",
        }
    }
}

/// Language profile selection shared by several commands.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Built-in language profile
    #[arg(short, long, default_value = "English")]
    pub language: String,

    /// Language profile JSON file (overrides --language)
    #[arg(long, value_name = "PROFILE_FILE")]
    pub profile: Option<PathBuf>,
}

impl ProfileArgs {
    /// Load the selected profile.
    pub fn load(&self) -> Result<LanguageProfile> {
        match &self.profile {
            Some(path) => LanguageProfile::from_json_file(path),
            None => LanguageProfile::builtin(&self.language),
        }
    }
}

/// Arguments for building a lexicon and its indexes
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Lexicon file, or - for stdin
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Pronunciation file (phrase, two or more spaces, phonemes)
    #[arg(short, long, value_name = "FILE")]
    pub pronunciations: Option<PathBuf>,

    /// Phonetic profile JSON file (defaults to the built-in Phonetics profile)
    #[arg(long, value_name = "PROFILE_FILE")]
    pub phonetic_profile: Option<PathBuf>,

    /// Exclusion list, one phrase per line
    #[arg(short, long, value_name = "FILE")]
    pub exclude: Option<PathBuf>,

    /// Index configuration JSON file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Minimum count for a wildcard key to be kept
    #[arg(long)]
    pub min_count: Option<usize>,

    /// Letter positions enumerated into wildcard keys
    #[arg(long)]
    pub max_key_len: Option<usize>,

    /// Shard count for the anagram and phonetic indexes
    #[arg(long)]
    pub shards: Option<usize>,

    /// Maximum letters in a lexicon entry
    #[arg(long)]
    pub max_entry_letters: Option<usize>,

    /// Number of worker threads
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Build on a single thread
    #[arg(long)]
    pub no_parallel: bool,

    /// Write the build output here instead of stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for segmenting text
#[derive(Parser, Debug, Clone)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Text to segment
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

/// Arguments for showing records by global index
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Lexicon file, or - for stdin
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// Global indices to look up
    #[arg(value_name = "INDEX", required = true)]
    pub indices: Vec<u32>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Exclusion list, one phrase per line
    #[arg(short, long, value_name = "FILE")]
    pub exclude: Option<PathBuf>,
}

/// Arguments for checking phonetic text
#[derive(Parser, Debug, Clone)]
pub struct CheckPhoneticsArgs {
    /// File to check, or - for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: PathBuf,

    /// Phonetic profile JSON file (defaults to the built-in Phonetics profile)
    #[arg(long, value_name = "PROFILE_FILE")]
    pub phonetic_profile: Option<PathBuf>,
}

/// Load a phonetic profile file, or the built-in Phonetics profile.
pub fn load_phonetic_profile(path: Option<&PathBuf>) -> Result<LanguageProfile> {
    match path {
        Some(path) => LanguageProfile::from_json_file(path),
        None => LanguageProfile::builtin("Phonetics"),
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_command() {
        let args = LexIndexArgs::parse_from([
            "lexindex",
            "-vv",
            "build",
            "words.txt",
            "--language",
            "French",
            "--min-count",
            "16",
            "--shards",
            "100",
            "--no-parallel",
        ]);
        assert_eq!(args.verbosity(), 2);
        let Command::Build(build) = args.command else {
            panic!("expected build command");
        };
        assert_eq!(build.lexicon, PathBuf::from("words.txt"));
        assert_eq!(build.profile.language, "French");
        assert_eq!(build.min_count, Some(16));
        assert_eq!(build.shards, Some(100));
        assert!(build.no_parallel);
        assert!(build.output.is_none());
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = LexIndexArgs::parse_from(["lexindex", "-q", "-vvv", "segment", "cat"]);
        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.log_level(), LevelFilter::Error);
        assert_eq!(args.command.name(), "segment");
    }

    #[test]
    fn test_log_levels() {
        let level = |argv: &[&str]| LexIndexArgs::parse_from(argv).log_level();
        assert_eq!(level(&["lexindex", "build", "words.txt"]), LevelFilter::Warn);
        assert!(log::Level::Warn <= level(&["lexindex", "build", "words.txt"]));
        assert_eq!(level(&["lexindex", "-vv", "build", "words.txt"]), LevelFilter::Info);
        assert_eq!(level(&["lexindex", "-vvvv", "build", "words.txt"]), LevelFilter::Debug);
    }

    #[test]
    fn test_default_verbosity_and_format() {
        let args = LexIndexArgs::parse_from(["lexindex", "check-phonetics"]);
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);
        let Command::CheckPhonetics(check) = args.command else {
            panic!("expected check-phonetics command");
        };
        assert_eq!(check.file, PathBuf::from("-"));
    }

    #[test]
    fn test_show_requires_indices() {
        assert!(LexIndexArgs::try_parse_from(["lexindex", "show", "words.txt"]).is_err());
        let args =
            LexIndexArgs::try_parse_from(["lexindex", "--format", "json", "show", "words.txt", "1", "3"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
