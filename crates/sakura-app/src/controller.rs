use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use sakura_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::events::{event_loop, publish_loop};
use crate::io::watcher_io;
use crate::ui::ui_loop;

type Channel = (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>);

/// Typed commands flow stdin -> event loop over `input`. The event loop and
/// the conversation publisher both write to `screen`, which only the
/// terminal renderer reads.
pub struct ChannelSet {
    pub screen: Channel,
    pub input: Channel,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            screen: kanal::bounded_async(256), // every log change is a full snapshot
            input: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the chat session tasks and stops them together
pub struct AppController {
    channels: ChannelSet,
    context: Arc<AppContext>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self {
            channels: ChannelSet::new(),
            context,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let (screen_tx, screen_rx) = self.channels.screen.clone();
        let (input_tx, input_rx) = self.channels.input.clone();

        // Session start, then one handler per command
        tasks.spawn(event_loop(self.context.clone(), input_rx, screen_tx.clone()));

        // Messages, busy flag, banner and word of the day
        tasks.spawn(publish_loop(
            self.context.controller.clone(),
            screen_tx,
            self.cancel_token.child_token(),
        ));

        tasks.spawn(ui_loop(screen_rx, self.context.config.ui.clone()));

        tasks.spawn(watcher_io(
            self.cancel_token.child_token(),
            input_tx,
            self.context.config.speech.language_tag.clone(),
        ));

        tasks
    }

    /// Stop the watchers and silence any utterance still playing
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        if let Some(speech) = &self.context.speech {
            speech.stop();
        }
    }
}
