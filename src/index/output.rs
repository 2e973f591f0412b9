//! The combined result of a build, in the shape downstream consumers load.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use serde::Serialize;

use crate::analysis::classifier::Script;
use crate::error::Result;
use crate::index::LexiconIndex;
use crate::index::sharded::ShardedIndex;
use crate::index::stats::IndexStats;
use crate::index::wildcard::WildcardIndex;
use crate::lexicon::record::{Lexicon, PhraseRecord};

/// Everything a build produces, borrowed from the lexicon and its indexes.
///
/// `forms` and `phonemes` are parallel arrays addressed by global index.
#[derive(Debug, Serialize)]
pub struct BuildOutput<'a> {
    /// `<language>-v<crate version>`.
    pub id: String,
    pub language: &'a str,
    pub script: Script,
    pub letters: &'a BTreeSet<String>,
    pub punctuation: &'a BTreeSet<String>,
    pub spaces: &'a BTreeSet<String>,
    pub conversions: &'a BTreeMap<String, String>,
    pub forms: Vec<&'a str>,
    pub phonemes: Vec<&'a BTreeSet<Vec<String>>>,
    pub records: &'a [PhraseRecord],
    pub index: &'a WildcardIndex,
    pub anagrams: &'a ShardedIndex,
    pub phonetic: &'a ShardedIndex,
    pub stats: &'a IndexStats,
}

impl<'a> BuildOutput<'a> {
    pub fn new(lexicon: &'a Lexicon, index: &'a LexiconIndex) -> Self {
        let forms = lexicon.forms().map(String::as_str).collect();
        let phonemes = lexicon
            .records
            .iter()
            .flat_map(|r| r.forms.iter().map(move |_| &r.phonemes))
            .collect();

        Self {
            id: format!("{}-v{}", lexicon.language, crate::VERSION),
            language: &lexicon.language,
            script: lexicon.script,
            letters: &lexicon.letters,
            punctuation: &lexicon.punctuation,
            spaces: &lexicon.spaces,
            conversions: &lexicon.conversions,
            forms,
            phonemes,
            records: &lexicon.records,
            index: &index.wildcard,
            anagrams: &index.anagrams,
            phonetic: &index.phonetic,
            stats: &index.stats,
        }
    }

    /// Write the output as JSON.
    pub fn write_json<W: Write>(&self, mut writer: W, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::profile::LanguageProfile;
    use crate::analysis::segmenter::GraphemeSegmenter;
    use crate::index::{IndexBuilder, IndexConfig};
    use crate::lexicon::builder::LexiconBuilder;
    use crate::lexicon::config::LexiconConfig;

    #[test]
    fn test_output_shape() {
        let segmenter = GraphemeSegmenter::new(LanguageProfile::builtin("English").unwrap()).unwrap();
        let mut lexicon = LexiconBuilder::new(&segmenter, LexiconConfig::default())
            .build(&["5\tcat", "5\tCat", "3\tdog"])
            .unwrap()
            .lexicon;
        lexicon.records[2]
            .phonemes
            .insert(vec!["D".to_string(), "AO".to_string(), "G".to_string()]);
        let index = IndexBuilder::new(IndexConfig::default().with_shards(3))
            .unwrap()
            .build(&lexicon)
            .unwrap();

        let output = BuildOutput::new(&lexicon, &index);
        assert_eq!(output.id, format!("en-v{}", crate::VERSION));
        assert_eq!(output.forms, vec!["", "Cat", "cat", "dog"]);
        assert_eq!(output.phonemes.len(), 4);
        assert_eq!(output.phonemes[3].len(), 1);

        let mut buf = Vec::new();
        output.write_json(&mut buf, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["language"], "en");
        assert_eq!(value["script"], "Latin");
        assert_eq!(value["letters"], serde_json::json!(["A", "C", "D", "G", "O", "T"]));
        assert_eq!(value["index"]["???"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["anagrams"].as_array().unwrap().len(), 3);
        assert_eq!(value["phonemes"][3], serde_json::json!([["D", "AO", "G"]]));
    }
}
