#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sakura_core::{
    RecognitionOptions, RecognitionPlatform, RecognitionResult, SpeechError, SynthesisPlatform,
    Utterance, Voice,
};
use sakura_provider::{ProviderError, ProviderMetadata, TutorProvider};
use sakura_types::LexiconEntry;
use tokio::sync::oneshot;

pub fn entry() -> LexiconEntry {
    LexiconEntry {
        word: "桜".into(),
        reading: "さくら".into(),
        meaning: "Cherry blossom".into(),
        example_source: "桜が咲きました。".into(),
        example_target: "The cherry blossoms bloomed.".into(),
    }
}

/// Tutor backend with canned replies. Translations echo as `EN:<text>`
/// unless a gate was registered for that text.
#[derive(Default)]
pub struct StubProvider {
    pub fail_initialize: bool,
    pub fail_translations: bool,
    pub replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    pub completion_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub translation_gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
}

impl StubProvider {
    pub fn replying(replies: impl IntoIterator<Item = Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn gate_completion(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.completion_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn gate_translation(&self, text: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.translation_gates
            .lock()
            .unwrap()
            .insert(text.to_string(), rx);
        tx
    }
}

#[async_trait]
impl TutorProvider for StubProvider {
    async fn initialize(&self, _model: &str, _system: &str) -> Result<(), ProviderError> {
        if self.fail_initialize {
            return Err(ProviderError::AuthenticationError);
        }
        Ok(())
    }

    async fn complete(&self, _user_text: &str) -> Result<String, ProviderError> {
        let gate = self.completion_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse))
    }

    async fn translate(&self, source_text: &str, target: &str) -> Result<String, ProviderError> {
        assert_eq!(target, "English");
        if self.fail_translations {
            return Err(ProviderError::ApiError("translation down".into()));
        }

        let gate = self.translation_gates.lock().unwrap().remove(source_text);
        match gate {
            Some(gate) => gate
                .await
                .map_err(|_| ProviderError::ApiError("gate dropped".into())),
            None => Ok(format!("EN:{source_text}")),
        }
    }

    async fn fetch_lexicon_entry(&self) -> LexiconEntry {
        entry()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "stub".into(),
            requires_api_key: false,
        }
    }
}

/// Synthesizer that records every utterance it finishes playing
pub struct RecordingSynth {
    voices: Vec<Voice>,
    play_time: Duration,
    spoken: Mutex<Vec<Utterance>>,
    cancels: AtomicUsize,
}

impl RecordingSynth {
    pub fn new(voices: Vec<Voice>, play_time: Duration) -> Arc<Self> {
        Arc::new(Self {
            voices,
            play_time,
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
        })
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken().into_iter().map(|u| u.text).collect()
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisPlatform for RecordingSynth {
    async fn load_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        Ok(self.voices.clone())
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        tokio::time::sleep(self.play_time).await;
        self.spoken.lock().unwrap().push(utterance);
        Ok(())
    }
}

/// Recognizer that returns one scripted session
pub struct ScriptedRecognizer {
    session: Mutex<Option<Result<Vec<RecognitionResult>, SpeechError>>>,
    seen: Mutex<Vec<RecognitionOptions>>,
}

impl ScriptedRecognizer {
    pub fn new(session: Result<Vec<RecognitionResult>, SpeechError>) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(Some(session)),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<RecognitionOptions> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecognitionPlatform for ScriptedRecognizer {
    async fn recognize(
        &self,
        options: &RecognitionOptions,
    ) -> Result<Vec<RecognitionResult>, SpeechError> {
        self.seen.lock().unwrap().push(options.clone());
        self.session
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(SpeechError::NoMatch))
    }
}

pub fn voice(name: &str, tag: &str) -> Voice {
    Voice {
        name: name.into(),
        language_tag: tag.into(),
    }
}
