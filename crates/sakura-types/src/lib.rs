pub mod chat;
pub mod lexicon;
pub mod message;
pub mod proxy;
pub mod types;

pub use chat::{ChatMessage, ChatReply, ChatRequest, ChatRole, Usage};
pub use lexicon::{LexiconEntry, RawLexiconEntry};
pub use message::{Message, MessageId, Sender};
pub use types::{AppEvent, Theme};
