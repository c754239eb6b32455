use std::sync::Arc;

use sakura_core::{ConversationController, TurnOutcome};

pub async fn handle_text_input(controller: Arc<ConversationController>, text: String) {
    tracing::debug!("TextInput received: {} chars", text.chars().count());

    match controller.submit_user_utterance(&text).await {
        TurnOutcome::Completed => tracing::debug!("Turn completed"),
        TurnOutcome::FellBack => tracing::warn!("Turn fell back to canned reply"),
        TurnOutcome::Ignored(reason) => tracing::debug!("Input ignored: {reason:?}"),
    }
}
