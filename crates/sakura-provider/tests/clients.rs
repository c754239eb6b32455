//! Client behaviour against a scripted transport

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sakura_provider::{
    ChatTransport, CompletionClient, CompletionSettings, HostedProvider, LexiconClient, Prompts,
    ProviderError, ProviderMetadata, TranslationClient, TutorProvider,
};
use sakura_types::{ChatMessage, ChatReply, ChatRequest, ChatRole, LexiconEntry};

/// Replays queued replies and records every request it sees
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    fn replying(replies: impl IntoIterator<Item = Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse));

        next.map(|content| ChatReply {
            content,
            usage: None,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            requires_api_key: false,
        }
    }
}

fn fallback() -> LexiconEntry {
    LexiconEntry {
        word: "勉強".into(),
        reading: "べんきょう".into(),
        meaning: "Study, Learning".into(),
        example_source: "毎日日本語を勉強しています。".into(),
        example_target: "I study Japanese every day.".into(),
    }
}

fn prompts() -> Prompts {
    Prompts {
        translate_template: "Translate to {target}: ".into(),
        lexicon_prompt: "Give me a word as JSON".into(),
        fallback_entry: fallback(),
    }
}

#[tokio::test]
async fn complete_requires_initialize() {
    let transport = ScriptedTransport::replying([Ok("unused".to_string())]);
    let client = CompletionClient::new(transport.clone(), CompletionSettings::default());

    assert!(matches!(
        client.complete("こんにちは").await,
        Err(ProviderError::NotInitialized)
    ));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn complete_commits_both_turns_on_success() {
    let transport = ScriptedTransport::replying([Ok("こんにちは！".to_string())]);
    let client = CompletionClient::new(transport.clone(), CompletionSettings::default());
    client.initialize("llama", "You are Sakura").await;

    let reply = client.complete("こんにちは").await.unwrap();
    assert_eq!(reply, "こんにちは！");

    let sent = &transport.requests()[0];
    assert_eq!(sent.model, "llama");
    assert_eq!(sent.temperature, Some(0.7));
    assert_eq!(sent.max_tokens, Some(1000));
    assert_eq!(
        sent.messages,
        vec![
            ChatMessage::system("You are Sakura"),
            ChatMessage::user("こんにちは")
        ]
    );

    let roles: Vec<_> = client.history().await.iter().map(|m| m.role).collect();
    assert_eq!(roles, [ChatRole::System, ChatRole::User, ChatRole::Assistant]);
}

#[tokio::test]
async fn failed_completion_leaves_history_untouched() {
    let transport = ScriptedTransport::replying([
        Err(ProviderError::RateLimitExceeded),
        Ok("はい".to_string()),
    ]);
    let client = CompletionClient::new(transport.clone(), CompletionSettings::default());
    client.initialize("llama", "sys").await;

    assert!(client.complete("一").await.is_err());
    assert_eq!(client.history().await.len(), 1);

    client.complete("二").await.unwrap();
    let history = client.history().await;
    assert_eq!(history.len(), 3);
    assert_eq!(history[1], ChatMessage::user("二"));

    // the retried turn carries no trace of the failed one
    assert_eq!(transport.requests()[1].messages.len(), 2);
}

#[tokio::test]
async fn initialize_resets_history() {
    let transport = ScriptedTransport::replying([Ok("a".to_string())]);
    let client = CompletionClient::new(transport, CompletionSettings::default());
    client.initialize("llama", "first").await;
    client.complete("q").await.unwrap();

    client.initialize("llama", "second").await;
    assert_eq!(client.history().await, vec![ChatMessage::system("second")]);
}

#[tokio::test]
async fn translation_trims_and_names_target() {
    let transport = ScriptedTransport::replying([Ok("  Hello!\n".to_string())]);
    let client = TranslationClient::new(transport.clone(), "llama".into(), "Into {target}: ".into());

    let text = client.translate("こんにちは", "English").await.unwrap();
    assert_eq!(text, "Hello!");

    let sent = &transport.requests()[0];
    assert_eq!(sent.messages, vec![ChatMessage::user("Into English: こんにちは")]);
    assert_eq!(sent.temperature, Some(0.3));
    assert_eq!(sent.max_tokens, Some(500));
}

#[tokio::test]
async fn translation_propagates_failure() {
    let transport = ScriptedTransport::replying([Err(ProviderError::AuthenticationError)]);
    let client = TranslationClient::new(transport, "llama".into(), "{target}: ".into());

    assert!(matches!(
        client.translate("猫", "English").await,
        Err(ProviderError::AuthenticationError)
    ));
}

#[tokio::test]
async fn lexicon_parses_fenced_json() {
    let transport = ScriptedTransport::replying([Ok(
        "```json\n{\"word\":\"猫\",\"reading\":\"ねこ\",\"meaning\":\"Cat\",\"exampleJapanese\":\"猫がいます。\",\"exampleEnglish\":\"There is a cat.\"}\n```"
            .to_string(),
    )]);
    let client = LexiconClient::new(transport.clone(), "llama".into(), "word".into(), fallback());

    let entry = client.fetch_entry().await;
    assert_eq!(entry.word, "猫");
    assert_eq!(entry.example_target, "There is a cat.");

    let sent = &transport.requests()[0];
    assert!(sent.json_mode);
    assert_eq!(sent.temperature, Some(0.8));
}

#[tokio::test]
async fn lexicon_missing_meaning_yields_fallback() {
    let transport = ScriptedTransport::replying([Ok(
        r#"{"word":"猫","reading":"ねこ","exampleJapanese":"猫がいます。","exampleEnglish":"There is a cat."}"#
            .to_string(),
    )]);
    let client = LexiconClient::new(transport, "llama".into(), "word".into(), fallback());

    let entry = client.fetch_entry().await;
    assert_eq!(entry, fallback());
    assert_eq!(entry.meaning, "Study, Learning");
}

#[tokio::test]
async fn lexicon_transport_error_yields_fallback() {
    let transport = ScriptedTransport::replying([Err(ProviderError::ApiError("boom".into()))]);
    let client = LexiconClient::new(transport, "llama".into(), "word".into(), fallback());

    assert!(client.try_fetch().await.is_err());
    assert_eq!(client.fetch_entry().await, fallback());
}

#[tokio::test]
async fn hosted_provider_routes_each_capability() {
    let transport = ScriptedTransport::replying([
        Ok("元気です！".to_string()),
        Ok(" I'm fine! ".to_string()),
        Ok("not json".to_string()),
    ]);
    let provider = HostedProvider::new(
        transport.clone(),
        "llama",
        CompletionSettings::default(),
        &prompts(),
    );

    provider.initialize("llama", "sys").await.unwrap();
    assert_eq!(provider.complete("元気？").await.unwrap(), "元気です！");
    assert_eq!(
        provider.translate("元気です！", "English").await.unwrap(),
        "I'm fine!"
    );
    assert_eq!(provider.fetch_lexicon_entry().await, fallback());
    assert_eq!(provider.metadata().name, "scripted");

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[1].messages[0].content,
        "Translate to English: 元気です！"
    );

    // translations are not part of the chat context
    assert_eq!(provider.history().await.len(), 3);
}
