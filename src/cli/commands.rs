//! Command implementations for the lexindex CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use crate::analysis::segmenter::GraphemeSegmenter;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::index::{BuildOutput, IndexBuilder, IndexConfig};
use crate::lexicon::reader::read_lines;
use crate::lexicon::{
    LexiconBuild, LexiconBuilder, LexiconConfig, add_pronunciations, open_source,
};

/// Execute a CLI command.
pub fn execute_command(args: LexIndexArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build(build_args.clone(), &args),
        Command::Segment(segment_args) => segment(segment_args.clone(), &args),
        Command::Show(show_args) => show(show_args.clone(), &args),
        Command::CheckPhonetics(check_args) => check_phonetics(check_args.clone(), &args),
    }
}

/// Resolve the index configuration from a config file and flag overrides.
pub fn index_config(args: &BuildArgs) -> Result<IndexConfig> {
    let mut config = match &args.config {
        Some(path) => IndexConfig::from_json_file(path)?,
        None => IndexConfig::default(),
    };
    if let Some(min_count) = args.min_count {
        config.min_count = min_count;
    }
    if let Some(max_key_len) = args.max_key_len {
        config.max_key_len = max_key_len;
    }
    if let Some(shards) = args.shards {
        config = config.with_shards(shards);
    }
    if let Some(threads) = args.threads {
        config.thread_pool_size = Some(threads);
    }
    if args.no_parallel {
        config.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

/// Resolve the lexicon configuration from flag overrides.
pub fn lexicon_config(args: &BuildArgs) -> LexiconConfig {
    let mut config = LexiconConfig::default().with_parallel(!args.no_parallel);
    if let Some(max) = args.max_entry_letters {
        config = config.with_max_entry_letters(max);
    }
    config
}

/// Build a lexicon and its indexes.
fn build(args: BuildArgs, cli_args: &LexIndexArgs) -> Result<()> {
    let start_time = Instant::now();
    let index_config = index_config(&args)?;
    let segmenter = GraphemeSegmenter::new(args.profile.load()?)?;
    log::info!("Using profile {}", segmenter.profile().name);

    let mut builder = LexiconBuilder::new(&segmenter, lexicon_config(&args));
    if let Some(path) = &args.exclude {
        builder = builder.with_exclusions_from(open_source(path)?)?;
        log::info!("Read {} exclusions", builder.exclusion_count());
    }
    let LexiconBuild {
        mut lexicon,
        report,
    } = builder.build_from_reader(open_source(&args.lexicon)?)?;
    log::info!("Read lexicon, have {} entries", lexicon.len());

    let pronunciations = match &args.pronunciations {
        Some(path) => {
            let phonetic =
                GraphemeSegmenter::new(load_phonetic_profile(args.phonetic_profile.as_ref())?)?;
            Some(add_pronunciations(
                open_source(path)?,
                &segmenter,
                &phonetic,
                &mut lexicon,
            )?)
        }
        None => None,
    };

    let index = IndexBuilder::new(index_config)?.build(&lexicon)?;
    let output = BuildOutput::new(&lexicon, &index);

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            output.write_json(&mut writer, cli_args.pretty)?;
            writer.flush()?;

            output_result(
                "Build completed successfully",
                &BuildSummary {
                    output: path.to_string_lossy().to_string(),
                    records: lexicon.len(),
                    forms: lexicon.total_forms(),
                    letters: lexicon.letters.len(),
                    skipped: report,
                    pronunciations,
                    wildcard_keys: index.wildcard.len(),
                    anagram_postings: index.anagrams.total_postings(),
                    phonetic_postings: index.phonetic.total_postings(),
                    duration_ms: start_time.elapsed().as_millis() as u64,
                },
                cli_args,
            )?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            output.write_json(&mut writer, cli_args.pretty)?;
            writer.flush()?;
        }
    }

    log::info!("Build finished in {:?}", start_time.elapsed());
    Ok(())
}

/// Print every segmentation layer of each text.
fn segment(args: SegmentArgs, cli_args: &LexIndexArgs) -> Result<()> {
    let segmenter = GraphemeSegmenter::new(args.profile.load()?)?;

    let results: Vec<SegmentResult> = args
        .text
        .iter()
        .map(|text| {
            let segmentation = segmenter.segment(text);
            SegmentResult {
                text: text.clone(),
                parts: segmentation.parts.iter().map(|p| p.text.clone()).collect(),
                pruned: segmentation.surface(),
                normalized: segmentation.normalized(),
                letters: segmentation.letters(),
            }
        })
        .collect();

    output_result("Segmentation", &results, cli_args)
}

/// Print the records owning the requested global indices.
fn show(args: ShowArgs, cli_args: &LexIndexArgs) -> Result<()> {
    let segmenter = GraphemeSegmenter::new(args.profile.load()?)?;
    let mut builder = LexiconBuilder::new(&segmenter, LexiconConfig::default());
    if let Some(path) = &args.exclude {
        builder = builder.with_exclusions_from(open_source(path)?)?;
    }
    let lexicon = builder.build_from_reader(open_source(&args.lexicon)?)?.lexicon;

    let results: Vec<ShowResult> = args
        .indices
        .iter()
        .map(|&index| match lexicon.record_for_index(index) {
            Some(record) => ShowResult {
                index,
                found: true,
                form: lexicon.form(index).cloned(),
                normalized: Some(record.normalized.clone()),
                importance: Some(record.importance),
                forms: record.forms.iter().cloned().collect(),
                phonemes: record.phonemes.iter().cloned().collect(),
            },
            None => ShowResult {
                index,
                found: false,
                form: None,
                normalized: None,
                importance: None,
                forms: Vec::new(),
                phonemes: Vec::new(),
            },
        })
        .collect();

    output_result("Records", &results, cli_args)
}

/// Report runs of text the phonetic profile does not recognize.
fn check_phonetics(args: CheckPhoneticsArgs, cli_args: &LexIndexArgs) -> Result<()> {
    let phonetic = GraphemeSegmenter::new(load_phonetic_profile(args.phonetic_profile.as_ref())?)?;
    let lines = read_lines(open_source(&args.file)?)?;

    let mut issues = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        for run in phonetic.unrecognized_runs(line) {
            issues.push(PhoneticIssue {
                line: i + 1,
                code_points: code_points(&run),
                text: run,
            });
        }
    }
    log::info!("Checked {} lines, found {} unrecognized runs", lines.len(), issues.len());

    output_result("Unrecognized phonetic text", &issues, cli_args)
}
