pub mod conversation;
pub mod log;
pub mod preprocess;
pub mod speech;

pub use conversation::{
    COMPLETION_FAILED_NOTICE, ConversationController, ControllerOptions, FallbackReply, Ignored,
    SESSION_START_FAILED_NOTICE, TRANSLATION_FAILED, TurnOutcome,
};
pub use log::MessageLog;
pub use speech::{
    Alternative, RecognitionOptions, RecognitionPlatform, RecognitionResult, SpeechBridge,
    SpeechError, SpeechSettings, SynthesisPlatform, Utterance, Voice, select_voice,
};
