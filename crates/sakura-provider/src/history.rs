use sakura_types::ChatMessage;

/// Role-tagged context sent with every completion.
///
/// The system instruction is always the first turn; user/assistant turns are
/// only ever appended as complete pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationHistory {
    turns: Vec<ChatMessage>,
}

impl ConversationHistory {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatMessage::system(system_instruction)],
        }
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// History followed by a user turn that is not yet committed
    pub fn with_pending(&self, user_text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.extend_from_slice(&self.turns);
        messages.push(ChatMessage::user(user_text));
        messages
    }

    /// Record a finished exchange
    pub fn commit(&mut self, user_text: &str, assistant_text: &str) {
        self.turns.push(ChatMessage::user(user_text));
        self.turns.push(ChatMessage::assistant(assistant_text));
    }
}
