use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use sakura_provider::LexiconClient;
use sakura_types::proxy::ProxyLexiconResponse;

use crate::{ProxyError, ProxyState};

/// `GET|POST /word-of-day`: always 200 once a credential is configured
pub async fn word_of_day(
    State(state): State<Arc<ProxyState>>,
) -> Result<Json<ProxyLexiconResponse>, ProxyError> {
    let upstream = state.upstream()?;

    let client = LexiconClient::new(
        upstream,
        state.default_model.clone(),
        state.prompts.lexicon_prompt.clone(),
        state.prompts.fallback_entry.clone(),
    );

    let response = match client.try_fetch().await {
        Ok((entry, usage)) => ProxyLexiconResponse {
            word_of_day: entry,
            fallback: false,
            usage,
        },
        Err(e) => {
            tracing::error!("Error in word-of-day: {e}");
            ProxyLexiconResponse {
                word_of_day: client.fallback().clone(),
                fallback: true,
                usage: None,
            }
        }
    };

    Ok(Json(response))
}
