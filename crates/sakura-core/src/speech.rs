use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::preprocess::{Preprocessor, SpeechPreprocessor};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech recognition is not supported on this system")]
    RecognitionUnsupported,

    #[error("speech synthesis is not supported on this system")]
    SynthesisUnsupported,

    #[error("could not start recognition: {0}")]
    Start(String),

    #[error("{0}")]
    Recognition(String),

    #[error("no speech was recognized")]
    NoMatch,

    #[error("synthesis error: {0}")]
    Synthesis(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub language_tag: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language_tag: String,
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    pub language_tag: String,
    pub continuous: bool,
    pub interim_results: bool,
    pub max_alternatives: u32,
}

impl RecognitionOptions {
    /// One final result with a single alternative
    pub fn single_shot(language_tag: &str) -> Self {
        Self {
            language_tag: language_tag.to_string(),
            continuous: false,
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub is_final: bool,
    pub alternatives: Vec<Alternative>,
}

impl RecognitionResult {
    pub fn final_transcript(transcript: impl Into<String>) -> Self {
        Self {
            is_final: true,
            alternatives: vec![Alternative {
                transcript: transcript.into(),
                confidence: 1.0,
            }],
        }
    }
}

#[async_trait]
pub trait SynthesisPlatform: Send + Sync {
    async fn load_voices(&self) -> Result<Vec<Voice>, SpeechError>;

    /// Stop whatever is currently playing. Must not block.
    fn cancel(&self);

    /// Play `utterance`, resolving once playback ends
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
}

#[async_trait]
pub trait RecognitionPlatform: Send + Sync {
    /// Run one listening session and return everything it produced
    async fn recognize(
        &self,
        options: &RecognitionOptions,
    ) -> Result<Vec<RecognitionResult>, SpeechError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Pause between cancelling the previous utterance and starting the next
    pub cancel_delay: Duration,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            cancel_delay: Duration::from_millis(100),
        }
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Exact tag match first, then any voice sharing the primary language subtag
pub fn select_voice<'a>(voices: &'a [Voice], language_tag: &str) -> Option<&'a Voice> {
    let wanted = normalize_tag(language_tag);
    if let Some(voice) = voices
        .iter()
        .find(|v| normalize_tag(&v.language_tag) == wanted)
    {
        return Some(voice);
    }

    let primary = primary_subtag(&wanted);
    voices
        .iter()
        .find(|v| primary_subtag(&normalize_tag(&v.language_tag)) == primary)
}

/// Wraps the platform speech engines.
///
/// Recognition is single-shot. Synthesis is last-call-wins: each `speak`
/// cancels whatever was queued or playing before it.
pub struct SpeechBridge {
    recognizer: Option<Arc<dyn RecognitionPlatform>>,
    synthesizer: Option<Arc<dyn SynthesisPlatform>>,
    settings: SpeechSettings,
    voices: Arc<RwLock<Vec<Voice>>>,
    current: Mutex<CancellationToken>,
    playback: TaskTracker,
}

impl SpeechBridge {
    pub fn new(
        recognizer: Option<Arc<dyn RecognitionPlatform>>,
        synthesizer: Option<Arc<dyn SynthesisPlatform>>,
        settings: SpeechSettings,
    ) -> Self {
        Self {
            recognizer,
            synthesizer,
            settings,
            voices: Arc::new(RwLock::new(Vec::new())),
            current: Mutex::new(CancellationToken::new()),
            playback: TaskTracker::new(),
        }
    }

    pub fn can_recognize(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn can_speak(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Fetch the platform voice list so later utterances can pick a voice
    pub async fn preload_voices(&self) {
        let Some(synthesizer) = &self.synthesizer else {
            return;
        };

        match synthesizer.load_voices().await {
            Ok(voices) => {
                tracing::info!("Loaded {} speech voices", voices.len());
                *self.voices.write().await = voices;
            }
            Err(e) => tracing::warn!("Could not load speech voices: {e}"),
        }
    }

    pub async fn voices(&self) -> Vec<Voice> {
        self.voices.read().await.clone()
    }

    /// Listen once and return the first final transcript
    pub async fn recognize_once(&self, language_tag: &str) -> Result<String, SpeechError> {
        let recognizer = self
            .recognizer
            .as_ref()
            .ok_or(SpeechError::RecognitionUnsupported)?;

        let results = recognizer
            .recognize(&RecognitionOptions::single_shot(language_tag))
            .await?;

        let transcript = results
            .into_iter()
            .filter(|r| r.is_final)
            .find_map(|r| r.alternatives.into_iter().next())
            .map(|a| a.transcript.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(SpeechError::NoMatch)?;

        tracing::debug!("Recognized: {transcript}");
        Ok(transcript)
    }

    /// Queue `text` for playback. Errors are logged, never returned.
    pub fn speak(&self, text: &str, language_tag: &str) {
        let Some(synthesizer) = self.synthesizer.clone() else {
            tracing::warn!("Speech synthesis not available");
            return;
        };

        synthesizer.cancel();
        let token = self.replace_current();

        let text = SpeechPreprocessor.process(text);
        if text.is_empty() {
            tracing::warn!("Nothing left to speak after removing pictographs");
            return;
        }

        let voices = Arc::clone(&self.voices);
        let settings = self.settings;
        let language_tag = language_tag.to_string();

        self.playback.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(settings.cancel_delay) => {}
            }

            let voice = {
                let voices = voices.read().await;
                select_voice(&voices, &language_tag).cloned()
            };
            match &voice {
                Some(v) => tracing::debug!("Using voice: {}", v.name),
                None => tracing::debug!("No voice for {language_tag}, using platform default"),
            }

            let utterance = Utterance {
                text,
                language_tag,
                voice,
                rate: settings.rate,
                pitch: settings.pitch,
                volume: settings.volume,
            };

            tokio::select! {
                _ = token.cancelled() => tracing::debug!("Utterance superseded"),
                result = synthesizer.speak(utterance) => {
                    if let Err(e) = result {
                        tracing::error!("Speech synthesis error: {e}");
                    }
                }
            }
        });
    }

    /// Cancel queued or playing speech
    pub fn stop(&self) {
        if let Some(synthesizer) = &self.synthesizer {
            synthesizer.cancel();
        }
        self.replace_current();
    }

    /// Resolve once every spawned utterance task has finished
    pub async fn wait_idle(&self) {
        self.playback.close();
        self.playback.wait().await;
        self.playback.reopen();
    }

    fn replace_current(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, token.clone())
        };
        previous.cancel();
        token
    }
}
