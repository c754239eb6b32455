use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Opaque message identifier, ordered by creation time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One displayed utterance.
///
/// `primary_text` is in the study language, `secondary_text` holds its
/// translation once it arrives. `None` means the translation is still pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub primary_text: String,
    pub secondary_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub avatar: Option<String>,
}

impl Message {
    pub fn new(sender: Sender, primary_text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            sender,
            primary_text: primary_text.into(),
            secondary_text: None,
            created_at: Utc::now(),
            avatar: None,
        }
    }

    pub fn user(primary_text: impl Into<String>) -> Self {
        Self::new(Sender::User, primary_text)
    }

    pub fn assistant(primary_text: impl Into<String>, avatar: Option<String>) -> Self {
        Self {
            avatar,
            ..Self::new(Sender::Assistant, primary_text)
        }
    }

    pub fn with_secondary(mut self, secondary_text: impl Into<String>) -> Self {
        self.secondary_text = Some(secondary_text.into());
        self
    }

    pub fn awaiting_translation(&self) -> bool {
        self.secondary_text.is_none()
    }
}
