use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{env_parse, env_string};

/// Upstream chat provider, chosen once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    Gemini,
    Proxy,
}

impl ProviderKind {
    /// Environment variable holding the provider credential, if one is needed
    pub fn credential_env(self) -> Option<&'static str> {
        match self {
            ProviderKind::Groq => Some("GROQ_API_KEY"),
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::Proxy => None,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Groq | ProviderKind::Proxy => "llama-3.3-70b-versatile",
            ProviderKind::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn default_api_base(self) -> &'static str {
        match self {
            ProviderKind::Groq | ProviderKind::Proxy => "https://api.groq.com/openai/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Proxy => "proxy",
        };
        f.write_str(name)
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "gemini" => Ok(ProviderKind::Gemini),
            "proxy" => Ok(ProviderKind::Proxy),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Base URL of the hosted API (Groq / Gemini)
    pub api_base: String,
    /// Base URL of `sakura-proxy`, used by the proxy provider
    pub proxy_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    pub fn new() -> Self {
        let provider = env_parse("SAKURA_PROVIDER").unwrap_or_default();
        Self::for_provider(provider)
    }

    /// Defaults for `provider`, with per-field environment overrides
    pub fn for_provider(provider: ProviderKind) -> Self {
        let model =
            env_string("SAKURA_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        let api_base =
            env_string("SAKURA_API_BASE").unwrap_or_else(|| provider.default_api_base().to_string());

        let proxy_url =
            env_string("SAKURA_PROXY_URL").unwrap_or_else(|| "http://localhost:8888".to_string());

        let temperature = env_parse("SAKURA_TEMPERATURE").unwrap_or(0.7);
        let max_tokens = env_parse("SAKURA_MAX_TOKENS").unwrap_or(1000);

        Self {
            provider,
            model,
            api_base,
            proxy_url,
            temperature,
            max_tokens,
        }
    }

    /// Read the provider credential from the process environment.
    ///
    /// `Ok(None)` means the provider needs no credential.
    pub fn api_key(&self) -> Result<Option<String>, MissingCredential> {
        match self.provider.credential_env() {
            None => Ok(None),
            Some(var) => env_string(var)
                .map(Some)
                .ok_or(MissingCredential { var }),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("API key is not configured. Please set the {var} environment variable.")]
pub struct MissingCredential {
    pub var: &'static str,
}
