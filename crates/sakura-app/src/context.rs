use std::sync::Arc;
use std::time::Duration;

use sakura_config::llm::{LlmConfig, MissingCredential};
use sakura_config::speech::SpeechConfig;
use sakura_config::{Config, PreferenceStore, ProviderKind};
use sakura_core::{
    ConversationController, RecognitionPlatform, SpeechBridge, SpeechSettings, SynthesisPlatform,
};
use sakura_io::{CommandRecognizer, CommandSynthesizer};
use sakura_lang_japanese::JapaneseTutor;
use sakura_provider::{
    ChatTransport, CompletionSettings, GeminiTransport, HostedProvider, OpenAiTransport,
    ProxyClient, ProxyProvider, TutorProvider,
};
use sakura_types::Theme;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    MissingCredential(#[from] MissingCredential),

    #[error("could not build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Everything the event loop and UI share
pub struct AppContext {
    pub config: Config,
    pub controller: Arc<ConversationController>,
    pub speech: Option<Arc<SpeechBridge>>,
    pub preferences: Option<PreferenceStore>,
    pub theme: RwLock<Theme>,
}

impl AppContext {
    pub async fn new(config: Config) -> Result<Self, InitError> {
        let provider = build_provider(&config.llm, config.timeout_seconds)?;
        let speech = build_speech(&config.speech).await;

        let preferences = PreferenceStore::in_data_dir();
        if preferences.is_none() {
            tracing::warn!("No data directory available, theme will not be saved");
        }

        Ok(Self::from_parts(config, provider, speech, preferences))
    }

    pub fn from_parts(
        config: Config,
        provider: Arc<dyn TutorProvider>,
        speech: Option<Arc<SpeechBridge>>,
        preferences: Option<PreferenceStore>,
    ) -> Self {
        let theme = preferences
            .as_ref()
            .map(PreferenceStore::theme)
            .unwrap_or_default();

        let mut options = JapaneseTutor::controller_options(config.ui.avatar.clone());
        options.speech_language_tag = config.speech.language_tag.clone();

        let controller = ConversationController::new(provider, speech.clone(), options);

        Self {
            config,
            controller: Arc::new(controller),
            speech,
            preferences,
            theme: RwLock::new(theme),
        }
    }

    /// Open the chat session with the tutor system instruction
    pub async fn start_session(&self) -> bool {
        self.controller
            .start(&self.config.llm.model, sakura_lang_japanese::SYSTEM_INSTRUCTION)
            .await
            .is_ok()
    }

    /// Flip the theme and persist it; returns the new theme
    pub async fn toggle_theme(&self) -> Theme {
        let theme = {
            let mut theme = self.theme.write().await;
            *theme = theme.toggled();
            *theme
        };

        if let Some(preferences) = &self.preferences
            && let Err(e) = preferences.save_theme(theme)
        {
            tracing::error!("Failed to save theme preference: {e}");
        }

        theme
    }
}

fn build_provider(llm: &LlmConfig, timeout_seconds: u64) -> Result<Arc<dyn TutorProvider>, InitError> {
    let api_key = llm.api_key()?.unwrap_or_default();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;

    let settings = CompletionSettings {
        temperature: llm.temperature,
        max_tokens: llm.max_tokens,
    };
    let prompts = JapaneseTutor::prompts();

    tracing::info!("Using {} provider with model {}", llm.provider, llm.model);

    let provider: Arc<dyn TutorProvider> = match llm.provider {
        ProviderKind::Groq => {
            let transport: Arc<dyn ChatTransport> = Arc::new(OpenAiTransport::with_client(
                client,
                api_key,
                llm.api_base.clone(),
            ));
            Arc::new(HostedProvider::new(transport, &llm.model, settings, &prompts))
        }
        ProviderKind::Gemini => {
            let transport: Arc<dyn ChatTransport> = Arc::new(GeminiTransport::with_client(
                client,
                api_key,
                llm.api_base.clone(),
            ));
            Arc::new(HostedProvider::new(transport, &llm.model, settings, &prompts))
        }
        ProviderKind::Proxy => {
            let proxy = Arc::new(ProxyClient::with_client(client, llm.proxy_url.clone()));
            Arc::new(ProxyProvider::new(
                proxy,
                &llm.model,
                settings,
                prompts.fallback_entry,
            ))
        }
    };

    Ok(provider)
}

async fn build_speech(config: &SpeechConfig) -> Option<Arc<SpeechBridge>> {
    if !config.enabled {
        tracing::info!("Speech disabled");
        return None;
    }

    let synthesizer: Option<Arc<dyn SynthesisPlatform>> = match &config.synthesizer_command {
        Some(program) => CommandSynthesizer::probe(program)
            .await
            .map(|s| Arc::new(s) as Arc<dyn SynthesisPlatform>),
        None => None,
    };

    let recognizer: Option<Arc<dyn RecognitionPlatform>> = config
        .recognizer_command
        .as_deref()
        .and_then(CommandRecognizer::from_command_line)
        .map(|r| Arc::new(r) as Arc<dyn RecognitionPlatform>);

    if synthesizer.is_none() && recognizer.is_none() {
        tracing::warn!("No speech synthesizer or recognizer available");
        return None;
    }

    let settings = SpeechSettings {
        rate: config.rate,
        pitch: config.pitch,
        volume: config.volume,
        cancel_delay: Duration::from_millis(config.cancel_delay_ms),
    };

    let bridge = SpeechBridge::new(recognizer, synthesizer, settings);
    bridge.preload_voices().await;
    Some(Arc::new(bridge))
}
