//! Criterion benchmarks for lexindex.
//!
//! Covers the two hot paths of a build:
//! - Grapheme segmentation across scripts
//! - Lexicon and index construction

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexindex::analysis::{GraphemeSegmenter, LanguageProfile};
use lexindex::index::{IndexBuilder, IndexConfig, WildcardIndexBuilder};
use lexindex::lexicon::{LexiconBuilder, LexiconConfig};

/// Generate scored lexicon lines for benchmarking.
fn generate_lexicon_lines(count: usize) -> Vec<String> {
    let syllables = [
        "ka", "lo", "mi", "ne", "ru", "sa", "to", "vi", "ze", "qu", "ph", "st", "ar", "on",
    ];

    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let len = 2 + (i % 4); // Two to five syllables
        let word: String = (0..len)
            .map(|j| syllables[(i * 7 + j * 13 + i / 14) % syllables.len()])
            .collect();
        let word = if i % 5 == 0 { word.to_uppercase() } else { word };
        lines.push(format!("{}\t{word}", count - i));
    }

    lines
}

/// Benchmark segmentation.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    let english = GraphemeSegmenter::new(LanguageProfile::builtin("English").unwrap()).unwrap();
    let hindi = GraphemeSegmenter::new(LanguageProfile::builtin("Hindi").unwrap()).unwrap();
    let phonetic = GraphemeSegmenter::new(LanguageProfile::builtin("Phonetics").unwrap()).unwrap();

    group.bench_function("english_phrase", |b| {
        b.iter(|| black_box(english.segment(black_box("Rock \u{2019}n\u{2019} Roll, Café-Crème"))))
    });

    group.bench_function("devanagari_phrase", |b| {
        b.iter(|| black_box(hindi.segment(black_box("नमस्ते दुनिया क़िताब"))))
    });

    group.bench_function("phonemes", |b| {
        b.iter(|| black_box(phonetic.letters_of(black_box("B AH0 N AE1 N AH0"))))
    });

    let lines = generate_lexicon_lines(1000);
    group.throughput(Throughput::Elements(lines.len() as u64));
    group.bench_function("letters_of_batch", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(english.letters_of(black_box(line)));
            }
        })
    });

    group.finish();
}

/// Benchmark lexicon and index building.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    let segmenter = GraphemeSegmenter::new(LanguageProfile::builtin("English").unwrap()).unwrap();
    let lines = generate_lexicon_lines(2000);
    group.throughput(Throughput::Elements(lines.len() as u64));

    for parallel in [false, true] {
        let name = if parallel { "lexicon_parallel" } else { "lexicon_sequential" };
        let config = LexiconConfig::default().with_parallel(parallel);
        group.bench_function(name, |b| {
            b.iter(|| {
                let build = LexiconBuilder::new(&segmenter, config.clone())
                    .build(black_box(&lines))
                    .unwrap();
                black_box(build)
            })
        });
    }

    let lexicon = LexiconBuilder::new(&segmenter, LexiconConfig::default())
        .build(&lines)
        .unwrap()
        .lexicon;

    for parallel in [false, true] {
        let name = if parallel { "wildcard_parallel" } else { "wildcard_sequential" };
        let config = IndexConfig::default().with_min_count(64).with_parallel(parallel);
        group.bench_function(name, |b| {
            b.iter(|| black_box(WildcardIndexBuilder::new(&lexicon, &config).unwrap().build()))
        });
    }

    let builder = IndexBuilder::new(IndexConfig::default().with_min_count(64)).unwrap();
    group.bench_function("all_indexes", |b| {
        b.iter(|| black_box(builder.build(black_box(&lexicon)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_segmentation, bench_build);
criterion_main!(benches);
