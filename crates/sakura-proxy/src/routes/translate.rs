use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use sakura_provider::TranslationClient;
use sakura_types::proxy::{ProxyTranslateRequest, ProxyTranslateResponse};

use super::parse_body;
use crate::{ProxyError, ProxyState};

const TRANSLATE_FAILED: &str = "Failed to translate text";
const DEFAULT_TARGET: &str = "English";

/// `POST /translate`: one-shot translation of `text`
pub async fn translate(
    State(state): State<Arc<ProxyState>>,
    body: Bytes,
) -> Result<Json<ProxyTranslateResponse>, ProxyError> {
    let upstream = state.upstream()?;

    let request: ProxyTranslateRequest =
        parse_body(&body).map_err(|e| ProxyError::failed(TRANSLATE_FAILED, e))?;
    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or(ProxyError::BadRequest("text"))?;

    let target = request
        .target_language
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TARGET.to_string());
    let model = request
        .model
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| state.default_model.clone());

    let client = TranslationClient::new(
        upstream,
        model,
        state.prompts.translate_template.clone(),
    );

    let reply = client
        .translate_detailed(&text, &target)
        .await
        .map_err(|e| ProxyError::failed(TRANSLATE_FAILED, e))?;

    Ok(Json(ProxyTranslateResponse {
        translation: reply.content,
        usage: reply.usage,
    }))
}
