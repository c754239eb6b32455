use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::routing::{get, post};
use serde::de::DeserializeOwned;

use crate::ProxyState;
use crate::error::method_not_allowed;

pub mod chat;
pub mod health;
pub mod translate;
pub mod word_of_day;

pub fn router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/chat", post(chat::chat).fallback(method_not_allowed))
        .route(
            "/translate",
            post(translate::translate).fallback(method_not_allowed),
        )
        .route(
            "/word-of-day",
            get(word_of_day::word_of_day)
                .post(word_of_day::word_of_day)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Parse a JSON body, treating an empty body as `{}`
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_str("{}");
    }
    serde_json::from_slice(body)
}
