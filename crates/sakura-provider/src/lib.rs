use sakura_types::{ChatReply, ChatRequest};

pub mod completion;
pub mod gemini;
pub mod history;
pub mod lexicon;
pub mod openai;
pub mod provider;
pub mod proxy;
pub mod translation;

pub use completion::{CompletionClient, CompletionSettings};
pub use gemini::GeminiTransport;
pub use history::ConversationHistory;
pub use lexicon::{LexiconClient, LexiconError};
pub use openai::OpenAiTransport;
pub use provider::{HostedProvider, Prompts, ProxyProvider, TutorProvider};
pub use proxy::ProxyClient;
pub use translation::TranslationClient;

/// Chat completion transport interface
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one completion request and return the assistant text
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ProviderError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Upstream returned no content")]
    EmptyResponse,

    #[error("Chat session has not been initialized")]
    NotInitialized,
}

/// Map common HTTP failure statuses onto provider errors.
///
/// `body` is the raw error payload, used for the message when present.
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status.as_u16() {
        429 => ProviderError::RateLimitExceeded,
        401 | 403 => ProviderError::AuthenticationError,
        _ => {
            let detail = serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| error_message(&v))
                .unwrap_or_else(|| format!("HTTP {status}"));
            ProviderError::ApiError(detail)
        }
    }
}

/// Pull a message out of `{"error": "..."}` or `{"error": {"message": "..."}}`
fn error_message(value: &serde_json::Value) -> Option<String> {
    let error = value.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(|m| m.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_throttling_and_auth_statuses() {
        assert!(matches!(
            status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, ""),
            ProviderError::RateLimitExceeded
        ));
        assert!(matches!(
            status_error(reqwest::StatusCode::UNAUTHORIZED, ""),
            ProviderError::AuthenticationError
        ));
    }

    #[test]
    fn extracts_error_message_from_body() {
        let flat = status_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Failed to process chat request"}"#,
        );
        assert_eq!(flat.to_string(), "API error: Failed to process chat request");

        let nested = status_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"model not found","type":"invalid_request_error"}}"#,
        );
        assert_eq!(nested.to_string(), "API error: model not found");

        let opaque = status_error(reqwest::StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(opaque.to_string(), "API error: HTTP 502 Bad Gateway");
    }
}
