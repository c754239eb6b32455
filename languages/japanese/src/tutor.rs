use sakura_core::{ControllerOptions, FallbackReply};
use sakura_provider::Prompts;
use sakura_types::LexiconEntry;

use crate::prompts::{TRANSLATE_TEMPLATE, WORD_OF_THE_DAY_PROMPT};

/// Japanese tutoring profile: language tags, prompts and fixed fallbacks
pub struct JapaneseTutor;

impl JapaneseTutor {
    /// BCP 47 tag used for recognition and synthesis
    pub const SPEECH_TAG: &'static str = "ja-JP";

    /// Label of the language translations are produced in
    pub const TARGET_LANGUAGE: &'static str = "English";

    pub fn prompts() -> Prompts {
        Prompts {
            translate_template: TRANSLATE_TEMPLATE.to_string(),
            lexicon_prompt: WORD_OF_THE_DAY_PROMPT.to_string(),
            fallback_entry: Self::fallback_entry(),
        }
    }

    pub fn fallback_entry() -> LexiconEntry {
        LexiconEntry {
            word: "勉強".to_string(),
            reading: "べんきょう".to_string(),
            meaning: "Study, Learning".to_string(),
            example_source: "毎日日本語を勉強しています。".to_string(),
            example_target: "I study Japanese every day.".to_string(),
        }
    }

    /// Shown in place of the assistant reply when a turn fails
    pub fn apology() -> FallbackReply {
        FallbackReply {
            source: "すみません、ちょっと問題がありました。".to_string(),
            target: "Sorry, I encountered an issue.".to_string(),
        }
    }

    pub fn controller_options(avatar: Option<String>) -> ControllerOptions {
        ControllerOptions {
            target_language: Self::TARGET_LANGUAGE.to_string(),
            speech_language_tag: Self::SPEECH_TAG.to_string(),
            avatar,
            fallback: Self::apology(),
        }
    }
}
