use std::ops::Deref;
use std::sync::Arc;

use sakura_types::{Message, Sender};

/// Ordered, append-only message log.
///
/// Cloning is cheap and yields an immutable snapshot: every mutation copies
/// the backing vector if a snapshot is still alive, so readers never observe
/// a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Arc<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        Arc::make_mut(&mut self.messages).push(message);
    }

    /// Attach a translation to the newest message from `sender`.
    ///
    /// Only applies while that message has no secondary text yet; otherwise
    /// (or if `sender` has no messages) the translation is dropped and
    /// `false` is returned. Older messages are never considered.
    pub fn apply_secondary(&mut self, sender: Sender, text: String) -> bool {
        let Some(index) = self.messages.iter().rposition(|m| m.sender == sender) else {
            return false;
        };

        if !self.messages[index].awaiting_translation() {
            return false;
        }

        Arc::make_mut(&mut self.messages)[index].secondary_text = Some(text);
        true
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.as_ref().clone()
    }
}

impl Deref for MessageLog {
    type Target = [Message];

    fn deref(&self) -> &[Message] {
        &self.messages
    }
}
