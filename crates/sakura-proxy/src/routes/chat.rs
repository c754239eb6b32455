use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use sakura_types::proxy::ProxyChatResponse;
use sakura_types::{ChatMessage, ChatRequest};
use serde::Deserialize;
use serde_json::Value;

use super::parse_body;
use crate::{ProxyError, ProxyState};

const CHAT_FAILED: &str = "Failed to process chat request";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Inbound `/chat` body. `messages` stays untyped until it is known to be an array.
#[derive(Debug, Default, Deserialize)]
struct ChatBody {
    #[serde(default)]
    messages: Option<Value>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

/// `POST /chat`: forward a full message list upstream
pub async fn chat(
    State(state): State<Arc<ProxyState>>,
    body: Bytes,
) -> Result<Json<ProxyChatResponse>, ProxyError> {
    let upstream = state.upstream()?;

    let request: ChatBody =
        parse_body(&body).map_err(|e| ProxyError::failed(CHAT_FAILED, e))?;
    let messages: Vec<ChatMessage> = match request.messages {
        Some(items @ Value::Array(_)) => {
            serde_json::from_value(items).map_err(|e| ProxyError::failed(CHAT_FAILED, e))?
        }
        _ => return Err(ProxyError::BadRequest("messages array")),
    };

    let model = request
        .model
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| state.default_model.clone());

    tracing::debug!(%model, turns = messages.len(), "Forwarding chat request");

    let upstream_request = ChatRequest::new(&model, messages)
        .temperature(request.temperature.unwrap_or(DEFAULT_TEMPERATURE))
        .max_tokens(request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS));

    let reply = upstream
        .send(&upstream_request)
        .await
        .map_err(|e| ProxyError::failed(CHAT_FAILED, e))?;

    Ok(Json(ProxyChatResponse {
        response: reply.content,
        usage: reply.usage,
    }))
}
