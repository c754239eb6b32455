use std::env;

use serde::{Deserialize, Serialize};

use self::llm::LlmConfig;
use self::proxy::ProxyConfig;
use self::speech::SpeechConfig;
use self::ui::UiConfig;

pub mod llm;
pub mod preferences;
pub mod proxy;
pub mod speech;
pub mod ui;

pub use llm::ProviderKind;
pub use preferences::PreferenceStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub proxy: ProxyConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,

    /// Upper bound for a single upstream HTTP call
    pub timeout_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        let timeout_seconds = env_parse("SAKURA_TIMEOUT_SECONDS").unwrap_or(30);

        Config {
            llm: LlmConfig::new(),
            proxy: ProxyConfig::new(),
            speech: SpeechConfig::new(),
            ui: UiConfig::new(),

            timeout_seconds,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse an environment variable, ignoring unset or malformed values
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Read a non-empty environment variable
pub(crate) fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Interpret common spellings of a boolean flag
pub(crate) fn env_flag(key: &str) -> Option<bool> {
    let value = env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
