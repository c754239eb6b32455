use std::sync::Arc;

use sakura_types::{ChatMessage, ChatRequest, LexiconEntry, RawLexiconEntry, Usage};

use crate::{ChatTransport, ProviderError};

const LEXICON_TEMPERATURE: f32 = 0.8;
const LEXICON_MAX_TOKENS: u32 = 500;

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid format for word of the day data")]
    InvalidFormat,
}

/// Remove a surrounding Markdown code fence (with optional language tag)
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    let body = inner
        .trim_start_matches(|c: char| c.is_alphanumeric() || c == '_')
        .trim();

    if body.is_empty() { trimmed } else { body }
}

/// Parse and validate a model answer into a lexicon entry
pub fn parse_entry(raw: &str) -> Result<LexiconEntry, LexiconError> {
    let parsed: RawLexiconEntry = serde_json::from_str(strip_code_fence(raw))?;
    parsed.validate().ok_or(LexiconError::InvalidFormat)
}

/// Fetches a structured "word of the day" from a chat model
#[derive(Clone)]
pub struct LexiconClient {
    transport: Arc<dyn ChatTransport>,
    model: String,
    prompt: String,
    fallback: LexiconEntry,
}

impl LexiconClient {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        model: String,
        prompt: String,
        fallback: LexiconEntry,
    ) -> Self {
        Self {
            transport,
            model,
            prompt,
            fallback,
        }
    }

    pub fn fallback(&self) -> &LexiconEntry {
        &self.fallback
    }

    /// One attempt, surfacing every failure
    pub async fn try_fetch(&self) -> Result<(LexiconEntry, Option<Usage>), LexiconError> {
        let request = ChatRequest::new(&self.model, vec![ChatMessage::user(self.prompt.clone())])
            .temperature(LEXICON_TEMPERATURE)
            .max_tokens(LEXICON_MAX_TOKENS)
            .json_mode();

        let reply = self.transport.send(&request).await?;
        tracing::debug!("Raw word of the day response: {}", reply.content);

        let entry = parse_entry(&reply.content)?;
        Ok((entry, reply.usage))
    }

    /// Never fails: any error yields the fixed fallback entry
    pub async fn fetch_entry(&self) -> LexiconEntry {
        match self.try_fetch().await {
            Ok((entry, _)) => {
                tracing::debug!("Parsed word of the day: {}", entry.word);
                entry
            }
            Err(e) => {
                tracing::warn!("Word of the day unavailable, using fallback: {e}");
                self.fallback.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fence_with_language_tag() {
        let raw = "```json\n{\"word\":\"猫\"}\n```";
        assert_eq!(strip_code_fence(raw), "{\"word\":\"猫\"}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  ```{\"a\":1}```  "), "{\"a\":1}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```"), "```");
    }

    #[test]
    fn parse_rejects_missing_meaning() {
        let raw = r#"{"word":"猫","reading":"ねこ","exampleJapanese":"猫がいます。","exampleEnglish":"There is a cat."}"#;
        assert!(matches!(parse_entry(raw), Err(LexiconError::InvalidFormat)));
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(matches!(
            parse_entry("Here is your word: 猫"),
            Err(LexiconError::Parse(_))
        ));
    }
}
