use std::sync::Arc;

use async_trait::async_trait;
use sakura_types::{ChatMessage, LexiconEntry};

use crate::completion::{CompletionClient, CompletionSettings};
use crate::lexicon::LexiconClient;
use crate::proxy::ProxyClient;
use crate::translation::TranslationClient;
use crate::{ChatTransport, ProviderError, ProviderMetadata};

/// Language-specific prompt material handed to a provider
#[derive(Debug, Clone)]
pub struct Prompts {
    /// Prefix placed before the text; `{target}` is replaced by the language label
    pub translate_template: String,
    pub lexicon_prompt: String,
    pub fallback_entry: LexiconEntry,
}

/// Everything the tutor needs from a language model backend
#[async_trait]
pub trait TutorProvider: Send + Sync {
    /// Reset the chat session to just the system instruction
    async fn initialize(&self, model: &str, system_instruction: &str) -> Result<(), ProviderError>;

    /// Next assistant reply for `user_text` given the session history
    async fn complete(&self, user_text: &str) -> Result<String, ProviderError>;

    /// Translate one string into the language named by `target`
    async fn translate(&self, source_text: &str, target: &str) -> Result<String, ProviderError>;

    /// Never fails; substitutes a fixed entry on any error
    async fn fetch_lexicon_entry(&self) -> LexiconEntry;

    fn metadata(&self) -> ProviderMetadata;
}

/// Provider that talks to a hosted model directly through a transport
pub struct HostedProvider {
    metadata: ProviderMetadata,
    completion: CompletionClient,
    translation: TranslationClient,
    lexicon: LexiconClient,
}

impl HostedProvider {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        model: &str,
        settings: CompletionSettings,
        prompts: &Prompts,
    ) -> Self {
        Self {
            metadata: transport.metadata(),
            completion: CompletionClient::new(transport.clone(), settings),
            translation: TranslationClient::new(
                transport.clone(),
                model.to_string(),
                prompts.translate_template.clone(),
            ),
            lexicon: LexiconClient::new(
                transport,
                model.to_string(),
                prompts.lexicon_prompt.clone(),
                prompts.fallback_entry.clone(),
            ),
        }
    }

    pub async fn history(&self) -> Vec<ChatMessage> {
        self.completion.history().await
    }
}

#[async_trait]
impl TutorProvider for HostedProvider {
    async fn initialize(&self, model: &str, system_instruction: &str) -> Result<(), ProviderError> {
        self.completion.initialize(model, system_instruction).await;
        Ok(())
    }

    async fn complete(&self, user_text: &str) -> Result<String, ProviderError> {
        self.completion.complete(user_text).await
    }

    async fn translate(&self, source_text: &str, target: &str) -> Result<String, ProviderError> {
        self.translation.translate(source_text, target).await
    }

    async fn fetch_lexicon_entry(&self) -> LexiconEntry {
        self.lexicon.fetch_entry().await
    }

    fn metadata(&self) -> ProviderMetadata {
        self.metadata.clone()
    }
}

/// Provider that routes every call through `sakura-proxy`
pub struct ProxyProvider {
    client: Arc<ProxyClient>,
    completion: CompletionClient,
    model: String,
    fallback: LexiconEntry,
}

impl ProxyProvider {
    pub fn new(
        client: Arc<ProxyClient>,
        model: &str,
        settings: CompletionSettings,
        fallback: LexiconEntry,
    ) -> Self {
        Self {
            completion: CompletionClient::new(client.clone(), settings),
            client,
            model: model.to_string(),
            fallback,
        }
    }
}

#[async_trait]
impl TutorProvider for ProxyProvider {
    async fn initialize(&self, model: &str, system_instruction: &str) -> Result<(), ProviderError> {
        self.completion.initialize(model, system_instruction).await;
        Ok(())
    }

    async fn complete(&self, user_text: &str) -> Result<String, ProviderError> {
        self.completion.complete(user_text).await
    }

    async fn translate(&self, source_text: &str, target: &str) -> Result<String, ProviderError> {
        self.client.translate(source_text, target, &self.model).await
    }

    async fn fetch_lexicon_entry(&self) -> LexiconEntry {
        match self.client.word_of_day().await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Word of the day unavailable, using fallback: {e}");
                self.fallback.clone()
            }
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "proxy".to_string(),
            requires_api_key: false,
        }
    }
}
