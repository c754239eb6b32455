use std::sync::Arc;

use sakura_core::ConversationController;

pub async fn handle_word_of_the_day(controller: Arc<ConversationController>) {
    let entry = controller.refresh_word_of_the_day().await;
    tracing::info!("Word of the day: {} ({})", entry.word, entry.reading);
}

pub fn handle_speak_word_of_the_day(controller: &ConversationController) {
    match controller.word_of_the_day() {
        Some(entry) => controller.request_speech(&entry.word, controller.speech_language_tag()),
        None => tracing::warn!("No word of the day loaded yet"),
    }
}
