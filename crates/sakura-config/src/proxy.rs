use serde::{Deserialize, Serialize};

use crate::env_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Address the proxy binds to
    pub bind_addr: String,
    /// OpenAI-compatible upstream the proxy forwards to
    pub upstream_url: String,
    /// Model used when a request names none
    pub default_model: String,
}

impl ProxyConfig {
    pub fn new() -> Self {
        let bind_addr =
            env_string("SAKURA_PROXY_BIND").unwrap_or_else(|| "127.0.0.1:8888".to_string());

        let upstream_url = env_string("SAKURA_PROXY_UPSTREAM")
            .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string());

        let default_model =
            env_string("SAKURA_MODEL").unwrap_or_else(|| "llama-3.3-70b-versatile".to_string());

        Self {
            bind_addr,
            upstream_url,
            default_model,
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::new()
    }
}
