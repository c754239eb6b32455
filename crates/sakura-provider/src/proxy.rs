use async_trait::async_trait;
use sakura_types::proxy::{
    ProxyChatRequest, ProxyChatResponse, ProxyTranslateRequest, ProxyTranslateResponse,
};
use sakura_types::{ChatReply, ChatRequest, LexiconEntry, RawLexiconEntry};
use serde::Deserialize;

use crate::lexicon::LexiconError;
use crate::{ChatTransport, ProviderError, ProviderMetadata, status_error};

/// Client for the credential-holding `sakura-proxy`
#[derive(Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct LexiconEnvelope {
    #[serde(rename = "wordOfDay", default)]
    word_of_day: Option<RawLexiconEntry>,
}

impl ProxyClient {
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    pub async fn translate(
        &self,
        text: &str,
        target: &str,
        model: &str,
    ) -> Result<String, ProviderError> {
        let body = ProxyTranslateRequest {
            text: Some(text.to_string()),
            target_language: Some(target.to_string()),
            model: Some(model.to_string()),
        };

        let response = self
            .client
            .post(self.endpoint("translate"))
            .json(&body)
            .send()
            .await?;

        let parsed: ProxyTranslateResponse = Self::checked(response).await?.json().await?;
        Ok(parsed.translation.trim().to_string())
    }

    pub async fn word_of_day(&self) -> Result<LexiconEntry, LexiconError> {
        let response = self
            .client
            .get(self.endpoint("word-of-day"))
            .send()
            .await
            .map_err(ProviderError::from)?;

        let envelope: LexiconEnvelope = Self::checked(response)
            .await?
            .json()
            .await
            .map_err(ProviderError::from)?;

        envelope
            .word_of_day
            .and_then(RawLexiconEntry::validate)
            .ok_or(LexiconError::InvalidFormat)
    }
}

#[async_trait]
impl ChatTransport for ProxyClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ProviderError> {
        let body = ProxyChatRequest {
            messages: Some(request.messages.clone()),
            model: Some(request.model.clone()),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint("chat"))
            .json(&body)
            .send()
            .await?;

        let parsed: ProxyChatResponse = Self::checked(response).await?.json().await?;
        Ok(ChatReply {
            content: parsed.response,
            usage: parsed.usage,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "proxy".to_string(),
            requires_api_key: false,
        }
    }
}
