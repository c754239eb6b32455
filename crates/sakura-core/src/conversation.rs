use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sakura_provider::{ProviderError, TutorProvider};
use sakura_types::{LexiconEntry, Message, Sender};
use tokio::sync::watch;
use tokio_util::task::TaskTracker;

use crate::log::MessageLog;
use crate::speech::{SpeechBridge, SpeechError};

/// Secondary text used when a translation request fails
pub const TRANSLATION_FAILED: &str = "(translation failed)";

pub const COMPLETION_FAILED_NOTICE: &str =
    "Failed to get response from AI. Please check your connection or API key.";

pub const SESSION_START_FAILED_NOTICE: &str =
    "Could not start chat session. Please try refreshing.";

/// Canned assistant reply shown when a turn fails, in both languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackReply {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Label passed to the translator, e.g. "English"
    pub target_language: String,
    /// Tag handed to recognition and synthesis, e.g. "ja-JP"
    pub speech_language_tag: String,
    pub avatar: Option<String>,
    pub fallback: FallbackReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    EmptyInput,
    TurnInFlight,
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Assistant replied normally
    Completed,
    /// Completion failed and the fallback pair was appended
    FellBack,
    Ignored(Ignored),
}

/// Holds the single-turn flag; released on drop
struct TurnGuard<'a> {
    busy: &'a watch::Sender<bool>,
}

impl<'a> TurnGuard<'a> {
    fn acquire(busy: &'a watch::Sender<bool>) -> Option<Self> {
        let acquired = busy.send_if_modified(|in_flight| {
            if *in_flight {
                false
            } else {
                *in_flight = true;
                true
            }
        });
        acquired.then_some(Self { busy })
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.busy.send_replace(false);
    }
}

/// Owns the message log and sequences each conversational turn.
///
/// At most one turn runs at a time. Translations run detached and are
/// attached to the newest message of their sender when they land.
pub struct ConversationController {
    provider: Arc<dyn TutorProvider>,
    speech: Option<Arc<SpeechBridge>>,
    options: ControllerOptions,
    log: Arc<watch::Sender<MessageLog>>,
    busy: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    lexicon: watch::Sender<Option<LexiconEntry>>,
    ready: AtomicBool,
    side_tasks: TaskTracker,
}

impl ConversationController {
    pub fn new(
        provider: Arc<dyn TutorProvider>,
        speech: Option<Arc<SpeechBridge>>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            provider,
            speech,
            options,
            log: Arc::new(watch::Sender::new(MessageLog::new())),
            busy: watch::Sender::new(false),
            error: watch::Sender::new(None),
            lexicon: watch::Sender::new(None),
            ready: AtomicBool::new(false),
            side_tasks: TaskTracker::new(),
        }
    }

    /// Open the chat session. Turns are ignored until this succeeds.
    pub async fn start(&self, model: &str, system_instruction: &str) -> Result<(), ProviderError> {
        match self.provider.initialize(model, system_instruction).await {
            Ok(()) => {
                tracing::info!(
                    "Chat session started with {} ({model})",
                    self.provider.metadata().name
                );
                self.ready.store(true, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to start chat session: {e}");
                self.error
                    .send_replace(Some(SESSION_START_FAILED_NOTICE.to_string()));
                Err(e)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub async fn submit_user_utterance(&self, text: &str) -> TurnOutcome {
        let text = text.trim();
        if text.is_empty() {
            return TurnOutcome::Ignored(Ignored::EmptyInput);
        }
        if !self.is_ready() {
            tracing::warn!("Chat session not started, ignoring input");
            return TurnOutcome::Ignored(Ignored::NotReady);
        }
        let Some(_guard) = TurnGuard::acquire(&self.busy) else {
            tracing::debug!("Turn already in flight, ignoring input");
            return TurnOutcome::Ignored(Ignored::TurnInFlight);
        };

        self.run_turn(text).await
    }

    /// Listen once and submit the transcript as a user turn.
    ///
    /// The turn flag is held while listening, so typed input is ignored
    /// until recognition finishes.
    pub async fn submit_voice_utterance(&self) -> Result<TurnOutcome, SpeechError> {
        if !self.is_ready() {
            return Ok(TurnOutcome::Ignored(Ignored::NotReady));
        }
        let Some(speech) = self.speech.as_ref().filter(|s| s.can_recognize()) else {
            self.report_voice_error(&SpeechError::RecognitionUnsupported);
            return Err(SpeechError::RecognitionUnsupported);
        };
        let Some(_guard) = TurnGuard::acquire(&self.busy) else {
            return Ok(TurnOutcome::Ignored(Ignored::TurnInFlight));
        };

        self.error.send_replace(None);
        let transcript = match speech
            .recognize_once(&self.options.speech_language_tag)
            .await
        {
            Ok(transcript) => transcript,
            Err(e) => {
                self.report_voice_error(&e);
                return Err(e);
            }
        };

        Ok(self.run_turn(&transcript).await)
    }

    /// Fire-and-forget playback of `text`
    pub fn request_speech(&self, text: &str, language_tag: &str) {
        match &self.speech {
            Some(speech) => speech.speak(text, language_tag),
            None => tracing::debug!("Speech disabled, not speaking"),
        }
    }

    /// Fetch a new word of the day; falls back to a fixed entry on failure
    pub async fn refresh_word_of_the_day(&self) -> LexiconEntry {
        let entry = self.provider.fetch_lexicon_entry().await;
        tracing::debug!("Word of the day: {}", entry.word);
        self.lexicon.send_replace(Some(entry.clone()));
        entry
    }

    pub fn messages(&self) -> MessageLog {
        self.log.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MessageLog> {
        self.log.subscribe()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn subscribe_word_of_the_day(&self) -> watch::Receiver<Option<LexiconEntry>> {
        self.lexicon.subscribe()
    }

    pub fn speech_language_tag(&self) -> &str {
        &self.options.speech_language_tag
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn dismiss_error(&self) {
        self.error.send_replace(None);
    }

    pub fn word_of_the_day(&self) -> Option<LexiconEntry> {
        self.lexicon.borrow().clone()
    }

    /// Wait for every outstanding translation to land
    pub async fn settle(&self) {
        self.side_tasks.close();
        self.side_tasks.wait().await;
        self.side_tasks.reopen();
    }

    async fn run_turn(&self, text: &str) -> TurnOutcome {
        self.error.send_replace(None);
        self.append(Message::user(text));
        self.spawn_translation(Sender::User, text.to_string());

        match self.provider.complete(text).await {
            Ok(reply) => {
                self.append(Message::assistant(reply.as_str(), self.options.avatar.clone()));
                self.request_speech(&reply, &self.options.speech_language_tag);
                self.spawn_translation(Sender::Assistant, reply);
                TurnOutcome::Completed
            }
            Err(e) => {
                tracing::error!("AI response error: {e}");
                let fallback = &self.options.fallback;
                let avatar = self.options.avatar.clone();
                self.append(
                    Message::assistant(fallback.source.as_str(), avatar.clone())
                        .with_secondary(fallback.target.as_str()),
                );
                self.append(
                    Message::assistant(fallback.target.as_str(), avatar)
                        .with_secondary(fallback.target.as_str()),
                );
                self.error
                    .send_replace(Some(COMPLETION_FAILED_NOTICE.to_string()));
                TurnOutcome::FellBack
            }
        }
    }

    fn append(&self, message: Message) {
        self.log.send_modify(|log| log.append(message));
    }

    fn spawn_translation(&self, sender: Sender, text: String) {
        let provider = Arc::clone(&self.provider);
        let log = Arc::clone(&self.log);
        let target = self.options.target_language.clone();

        self.side_tasks.spawn(async move {
            let secondary = match provider.translate(&text, &target).await {
                Ok(translation) => translation,
                Err(e) => {
                    tracing::error!("Translation error: {e}");
                    TRANSLATION_FAILED.to_string()
                }
            };

            if !log.send_if_modified(|log| log.apply_secondary(sender, secondary)) {
                tracing::debug!("Dropped late {sender:?} translation");
            }
        });
    }

    fn report_voice_error(&self, error: &SpeechError) {
        tracing::error!("Speech recognition error: {error}");
        self.error
            .send_replace(Some(format!("Voice recognition failed: {error}")));
    }
}
