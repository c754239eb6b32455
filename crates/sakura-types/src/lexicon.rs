use serde::{Deserialize, Serialize};

/// "Word of the day" record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    #[serde(rename = "exampleSource", alias = "exampleJapanese")]
    pub example_source: String,
    #[serde(rename = "exampleTarget", alias = "exampleEnglish")]
    pub example_target: String,
}

/// Unvalidated lexicon payload as produced by a model or a remote endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLexiconEntry {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub reading: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default, alias = "exampleSource", alias = "exampleJapanese")]
    pub example_source: Option<String>,
    #[serde(default, alias = "exampleTarget", alias = "exampleEnglish")]
    pub example_target: Option<String>,
}

impl RawLexiconEntry {
    /// Accept only when all five fields are present and non-blank
    pub fn validate(self) -> Option<LexiconEntry> {
        fn field(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Some(LexiconEntry {
            word: field(self.word)?,
            reading: field(self.reading)?,
            meaning: field(self.meaning)?,
            example_source: field(self.example_source)?,
            example_target: field(self.example_target)?,
        })
    }
}
