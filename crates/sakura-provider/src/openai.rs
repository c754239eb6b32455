use async_trait::async_trait;
use sakura_types::{ChatMessage, ChatReply, ChatRequest, Usage};
use serde::{Deserialize, Serialize};

use crate::{ChatTransport, ProviderError, ProviderMetadata, status_error};

/// OpenAI-compatible `/chat/completions` endpoint (Groq and friends)
#[derive(Clone)]
pub struct OpenAiTransport {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl OpenAiTransport {
    pub fn new(api_key: String, api_base: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, api_base)
    }

    pub fn with_client(client: reqwest::Client, api_key: String, api_base: String) -> Self {
        Self {
            client,
            api_key,
            api_base,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    top_p: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> From<&'a ChatRequest> for CompletionBody<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            messages: &request.messages,
            model: &request.model,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: 1.0,
            stream: false,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError);
        }

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&CompletionBody::from(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            ProviderError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(ChatReply {
            content,
            usage: parsed.usage,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "groq".to_string(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_fixed_sampling_fields() {
        let request = ChatRequest::new("llama", vec![ChatMessage::user("hi")])
            .temperature(0.7)
            .max_tokens(1000);
        let json = serde_json::to_value(CompletionBody::from(&request)).unwrap();

        assert_eq!(json["model"], "llama");
        assert_eq!(json["top_p"], 1.0);
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn json_mode_requests_json_object() {
        let request = ChatRequest::new("llama", vec![ChatMessage::user("word")]).json_mode();
        let json = serde_json::to_value(CompletionBody::from(&request)).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let transport = OpenAiTransport::new("k".into(), "https://api.groq.com/openai/v1/".into());
        assert_eq!(
            transport.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn empty_key_is_rejected_before_sending() {
        let transport = OpenAiTransport::new(String::new(), "http://127.0.0.1:9".into());
        let request = ChatRequest::new("llama", vec![ChatMessage::user("hi")]);
        assert!(matches!(
            transport.send(&request).await,
            Err(ProviderError::AuthenticationError)
        ));
    }
}
