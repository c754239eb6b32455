use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use sakura_core::ConversationController;
use sakura_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

pub mod text_input;
pub mod theme;
pub mod voice_input;
pub mod word_of_day;

use text_input::handle_text_input;
use theme::handle_theme_toggle;
use voice_input::handle_voice_input;
use word_of_day::{handle_speak_word_of_the_day, handle_word_of_the_day};

/// App's main loop
pub async fn event_loop(
    context: Arc<AppContext>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let theme = *context.theme.read().await;
    app_to_ui_tx.send(AppEvent::ThemeChanged(theme)).await?;

    if context.start_session().await {
        app_to_ui_tx.send(AppEvent::BackendReady).await?;
        tokio::spawn(handle_word_of_the_day(context.controller.clone()));
    }

    tracing::debug!("Event loop waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;
        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));

        if matches!(event, AppEvent::Quit) {
            tracing::info!("Quit requested");
            return Ok(());
        }

        handle_events(&context, &app_to_ui_tx, event).await?;
    }
}

async fn handle_events(
    context: &Arc<AppContext>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    let controller = &context.controller;

    match event {
        // Turns run detached so the loop keeps draining input; the
        // controller itself ignores submissions while one is in flight.
        AppEvent::TextInput(text) => {
            tokio::spawn(handle_text_input(controller.clone(), text));
        }
        AppEvent::VoiceInput => {
            tokio::spawn(handle_voice_input(controller.clone()));
        }
        AppEvent::SpeakText { text, language_tag } => {
            controller.request_speech(&text, &language_tag);
        }
        AppEvent::FetchWordOfTheDay => {
            tokio::spawn(handle_word_of_the_day(controller.clone()));
        }
        AppEvent::SpeakWordOfTheDay => handle_speak_word_of_the_day(controller),
        AppEvent::ToggleTheme => handle_theme_toggle(context, app_to_ui_tx).await?,
        AppEvent::DismissError => controller.dismiss_error(),
        AppEvent::Quit => {}

        // UI-only events
        AppEvent::ShowMessages(_)
        | AppEvent::ShowWordOfTheDay(_)
        | AppEvent::ShowError(_)
        | AppEvent::ThemeChanged(_)
        | AppEvent::BusyChanged(_)
        | AppEvent::BackendReady => {}
    }

    Ok(())
}

/// Forward controller state changes to the UI
pub async fn publish_loop(
    controller: Arc<ConversationController>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut log = controller.subscribe();
    let mut busy = controller.subscribe_busy();
    let mut error = controller.subscribe_error();
    let mut word = controller.subscribe_word_of_the_day();
    drop(controller);

    // replay whatever was set before we subscribed
    log.mark_changed();
    busy.mark_changed();
    error.mark_changed();
    word.mark_changed();

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            changed = log.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                AppEvent::ShowMessages(log.borrow_and_update().to_vec())
            }
            changed = busy.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                AppEvent::BusyChanged(*busy.borrow_and_update())
            }
            changed = error.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                AppEvent::ShowError(error.borrow_and_update().clone())
            }
            changed = word.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                match word.borrow_and_update().clone() {
                    Some(entry) => AppEvent::ShowWordOfTheDay(entry),
                    None => continue,
                }
            }
        };

        app_to_ui_tx.send(event).await?;
    }
}
