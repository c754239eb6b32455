use std::sync::Arc;

use sakura_core::ConversationController;

pub async fn handle_voice_input(controller: Arc<ConversationController>) {
    tracing::info!("Listening...");

    match controller.submit_voice_utterance().await {
        Ok(outcome) => tracing::debug!("Voice turn: {outcome:?}"),
        // already surfaced through the error banner
        Err(e) => tracing::debug!("Voice turn failed: {e}"),
    }
}
