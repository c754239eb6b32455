use serde::{Deserialize, Serialize};

use crate::{env_flag, env_parse, env_string};

fn default_enabled() -> bool {
    true
}

fn default_language_tag() -> String {
    "ja-JP".to_string()
}

fn default_synthesizer_command() -> Option<String> {
    Some("espeak-ng".to_string())
}

fn default_rate() -> f32 {
    0.9
}

fn default_unit() -> f32 {
    1.0
}

fn default_cancel_delay_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_language_tag")]
    pub language_tag: String,
    /// Program used for speech synthesis, `None` disables playback
    #[serde(default = "default_synthesizer_command")]
    pub synthesizer_command: Option<String>,
    /// Program that listens once and prints the transcript on stdout
    #[serde(default)]
    pub recognizer_command: Option<String>,
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_unit")]
    pub pitch: f32,
    #[serde(default = "default_unit")]
    pub volume: f32,
    /// Pause between cancelling one utterance and starting the next
    #[serde(default = "default_cancel_delay_ms")]
    pub cancel_delay_ms: u64,
}

impl SpeechConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            enabled: env_flag("SAKURA_SPEECH").unwrap_or(defaults.enabled),
            language_tag: env_string("SAKURA_SPEECH_LANG").unwrap_or(defaults.language_tag),
            synthesizer_command: env_string("SAKURA_TTS_COMMAND").or(defaults.synthesizer_command),
            recognizer_command: env_string("SAKURA_STT_COMMAND"),
            rate: env_parse("SAKURA_SPEECH_RATE").unwrap_or(defaults.rate),
            ..defaults
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            language_tag: default_language_tag(),
            synthesizer_command: default_synthesizer_command(),
            recognizer_command: None,
            rate: default_rate(),
            pitch: default_unit(),
            volume: default_unit(),
            cancel_delay_ms: default_cancel_delay_ms(),
        }
    }
}
