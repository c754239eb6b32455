use std::sync::Arc;

use sakura_types::{ChatMessage, ChatReply, ChatRequest};

use crate::{ChatTransport, ProviderError};

/// Marker replaced by the target language label in a translation template
pub const TARGET_MARKER: &str = "{target}";

const TRANSLATE_TEMPERATURE: f32 = 0.3;
const TRANSLATE_MAX_TOKENS: u32 = 500;

/// Stateless single-string translation through a chat model
#[derive(Clone)]
pub struct TranslationClient {
    transport: Arc<dyn ChatTransport>,
    model: String,
    template: String,
}

impl TranslationClient {
    pub fn new(transport: Arc<dyn ChatTransport>, model: String, template: String) -> Self {
        Self {
            transport,
            model,
            template,
        }
    }

    pub fn prompt(&self, source_text: &str, target: &str) -> String {
        format!("{}{}", self.template.replace(TARGET_MARKER, target), source_text)
    }

    pub async fn translate(&self, source_text: &str, target: &str) -> Result<String, ProviderError> {
        Ok(self.translate_detailed(source_text, target).await?.content)
    }

    /// Like [`translate`](Self::translate) but keeps the usage metadata
    pub async fn translate_detailed(
        &self,
        source_text: &str,
        target: &str,
    ) -> Result<ChatReply, ProviderError> {
        let request = ChatRequest::new(
            &self.model,
            vec![ChatMessage::user(self.prompt(source_text, target))],
        )
        .temperature(TRANSLATE_TEMPERATURE)
        .max_tokens(TRANSLATE_MAX_TOKENS);

        let reply = self.transport.send(&request).await?;
        let translated = reply.content.trim().to_string();
        tracing::debug!("Translation result: {translated}");

        Ok(ChatReply {
            content: translated,
            usage: reply.usage,
        })
    }
}
