use std::sync::Arc;

use sakura_types::{ChatMessage, ChatRequest};
use tokio::sync::Mutex;

use crate::history::ConversationHistory;
use crate::{ChatTransport, ProviderError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

struct Session {
    model: String,
    history: ConversationHistory,
}

/// Multi-turn chat against a transport, owning the conversation history
pub struct CompletionClient {
    transport: Arc<dyn ChatTransport>,
    settings: CompletionSettings,
    session: Mutex<Option<Session>>,
}

impl CompletionClient {
    pub fn new(transport: Arc<dyn ChatTransport>, settings: CompletionSettings) -> Self {
        Self {
            transport,
            settings,
            session: Mutex::new(None),
        }
    }

    /// Start a fresh session; history becomes just the system instruction
    pub async fn initialize(&self, model: &str, system_instruction: &str) {
        *self.session.lock().await = Some(Session {
            model: model.to_string(),
            history: ConversationHistory::new(system_instruction),
        });
        tracing::info!("Chat session initialized (model: {model})");
    }

    /// Send `user_text` with the stored history.
    ///
    /// The user and assistant turns are committed together, only once the
    /// upstream answered; a failed call leaves the history untouched.
    pub async fn complete(&self, user_text: &str) -> Result<String, ProviderError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(ProviderError::NotInitialized)?;

        let request = ChatRequest::new(&session.model, session.history.with_pending(user_text))
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_tokens);

        tracing::debug!(
            "Sending message to {} ({} turns)",
            self.transport.metadata().name,
            request.messages.len()
        );

        let reply = self.transport.send(&request).await?;
        session.history.commit(user_text, &reply.content);

        tracing::debug!("Received response: {} chars", reply.content.chars().count());
        Ok(reply.content)
    }

    /// Snapshot of the current history, empty before `initialize`
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.history.turns().to_vec())
            .unwrap_or_default()
    }
}
