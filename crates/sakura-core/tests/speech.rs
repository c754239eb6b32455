//! Speech bridge behaviour against recording platforms

mod support;

use std::sync::Arc;
use std::time::Duration;

use sakura_core::{
    Alternative, RecognitionResult, SpeechBridge, SpeechError, SpeechSettings,
};
use support::{RecordingSynth, ScriptedRecognizer, voice};

fn settings(delay_ms: u64) -> SpeechSettings {
    SpeechSettings {
        cancel_delay: Duration::from_millis(delay_ms),
        ..SpeechSettings::default()
    }
}

#[tokio::test]
async fn last_call_wins_before_playback_starts() {
    let synth = RecordingSynth::new(Vec::new(), Duration::ZERO);
    let bridge = SpeechBridge::new(None, Some(synth.clone()), settings(50));

    bridge.speak("一", "ja-JP");
    bridge.speak("二", "ja-JP");
    bridge.wait_idle().await;

    assert_eq!(synth.spoken_texts(), ["二"]);
    assert_eq!(synth.cancels(), 2);
}

#[tokio::test]
async fn new_utterance_interrupts_playing_one() {
    let synth = RecordingSynth::new(Vec::new(), Duration::from_millis(300));
    let bridge = SpeechBridge::new(None, Some(synth.clone()), settings(1));

    bridge.speak("一", "ja-JP");
    tokio::time::sleep(Duration::from_millis(50)).await;
    bridge.speak("二", "ja-JP");
    bridge.wait_idle().await;

    assert_eq!(synth.spoken_texts(), ["二"]);
}

#[tokio::test]
async fn utterance_carries_voice_and_prosody() {
    let synth = RecordingSynth::new(
        vec![voice("Samantha", "en-US"), voice("Kyoko", "ja-JP")],
        Duration::ZERO,
    );
    let bridge = SpeechBridge::new(None, Some(synth.clone()), settings(1));
    bridge.preload_voices().await;
    assert_eq!(bridge.voices().await.len(), 2);

    bridge.speak("桜", "ja-JP");
    bridge.wait_idle().await;

    let spoken = synth.spoken();
    assert_eq!(spoken[0].voice.as_ref().map(|v| v.name.as_str()), Some("Kyoko"));
    assert_eq!(spoken[0].rate, 0.9);
    assert_eq!(spoken[0].pitch, 1.0);
    assert_eq!(spoken[0].volume, 1.0);
}

#[tokio::test]
async fn pictograph_only_text_is_not_spoken() {
    let synth = RecordingSynth::new(Vec::new(), Duration::ZERO);
    let bridge = SpeechBridge::new(None, Some(synth.clone()), settings(1));

    bridge.speak("🌸✨", "ja-JP");
    bridge.wait_idle().await;

    assert!(synth.spoken().is_empty());
}

#[tokio::test]
async fn pictograph_only_text_still_interrupts_playing_utterance() {
    let synth = RecordingSynth::new(Vec::new(), Duration::from_millis(200));
    let bridge = SpeechBridge::new(None, Some(synth.clone()), settings(1));

    bridge.speak("一", "ja-JP");
    tokio::time::sleep(Duration::from_millis(30)).await;
    bridge.speak("🌸", "ja-JP");
    bridge.wait_idle().await;

    assert!(synth.spoken().is_empty());
    assert_eq!(synth.cancels(), 2);
}

#[tokio::test]
async fn speak_without_synthesizer_is_silent() {
    let bridge = SpeechBridge::new(None, None, settings(1));
    assert!(!bridge.can_speak());

    bridge.speak("桜", "ja-JP");
    bridge.wait_idle().await;
}

#[tokio::test]
async fn recognition_takes_first_final_alternative() {
    let recognizer = ScriptedRecognizer::new(Ok(vec![
        RecognitionResult {
            is_final: false,
            alternatives: vec![Alternative {
                transcript: "おは".into(),
                confidence: 0.4,
            }],
        },
        RecognitionResult::final_transcript(" おはよう "),
        RecognitionResult::final_transcript("こんばんは"),
    ]));
    let bridge = SpeechBridge::new(Some(recognizer.clone()), None, settings(1));

    assert_eq!(bridge.recognize_once("ja-JP").await.unwrap(), "おはよう");

    let options = &recognizer.seen()[0];
    assert_eq!(options.language_tag, "ja-JP");
    assert!(!options.continuous);
    assert!(!options.interim_results);
    assert_eq!(options.max_alternatives, 1);
}

#[tokio::test]
async fn recognition_without_final_result_is_no_match() {
    let recognizer = ScriptedRecognizer::new(Ok(Vec::new()));
    let bridge = SpeechBridge::new(Some(recognizer), None, settings(1));

    assert_eq!(
        bridge.recognize_once("ja-JP").await.unwrap_err(),
        SpeechError::NoMatch
    );
}

#[tokio::test]
async fn recognition_without_platform_is_unsupported() {
    let bridge = SpeechBridge::new(None, None, settings(1));

    assert!(!bridge.can_recognize());
    assert_eq!(
        bridge.recognize_once("ja-JP").await.unwrap_err(),
        SpeechError::RecognitionUnsupported
    );
}

#[tokio::test]
async fn stop_cancels_pending_utterance() {
    let synth = RecordingSynth::new(Vec::new(), Duration::ZERO);
    let bridge = Arc::new(SpeechBridge::new(None, Some(synth.clone()), settings(50)));

    bridge.speak("一", "ja-JP");
    bridge.stop();
    bridge.wait_idle().await;

    assert!(synth.spoken().is_empty());
}
