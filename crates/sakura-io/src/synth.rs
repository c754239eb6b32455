use std::process::Stdio;

use async_trait::async_trait;
use sakura_core::{SpeechError, SynthesisPlatform, Utterance, Voice};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Notify;

/// espeak-ng words per minute at rate 1.0
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Speech synthesis through an espeak-compatible command line program
pub struct CommandSynthesizer {
    program: String,
    stop: Notify,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            stop: Notify::new(),
        }
    }

    /// `Some` only if `program` can actually be launched
    pub async fn probe(program: &str) -> Option<Self> {
        let available = Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success());

        if !available {
            tracing::warn!("Speech synthesizer `{program}` not found");
            return None;
        }

        Some(Self::new(program))
    }
}

/// Command line arguments for one utterance; text goes through stdin
pub fn speak_args(utterance: &Utterance) -> Vec<String> {
    let voice = utterance
        .voice
        .as_ref()
        .map(|v| v.language_tag.clone())
        .unwrap_or_else(|| utterance.language_tag.to_ascii_lowercase());

    let speed = (BASE_WORDS_PER_MINUTE * utterance.rate).round().clamp(80.0, 450.0) as u32;
    let pitch = (50.0 * utterance.pitch).round().clamp(0.0, 99.0) as u32;
    let amplitude = (100.0 * utterance.volume).round().clamp(0.0, 200.0) as u32;

    vec![
        "-v".to_string(),
        voice,
        "-s".to_string(),
        speed.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "-a".to_string(),
        amplitude.to_string(),
        "--stdin".to_string(),
    ]
}

/// Parse the table printed by `espeak-ng --voices`
pub fn parse_voice_table(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_, language, _, name, ..] => Some(Voice {
                    name: name.replace('_', " "),
                    language_tag: language.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

#[async_trait]
impl SynthesisPlatform for CommandSynthesizer {
    async fn load_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .output()
            .await
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;

        if !output.status.success() {
            return Err(SpeechError::Synthesis(format!(
                "`{} --voices` exited with {}",
                self.program, output.status
            )));
        }

        Ok(parse_voice_table(&String::from_utf8_lossy(&output.stdout)))
    }

    fn cancel(&self) {
        self.stop.notify_waiters();
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(speak_args(&utterance))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(utterance.text.as_bytes())
                .await
                .map_err(|e| SpeechError::Synthesis(e.to_string()))?;
        }

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| SpeechError::Synthesis(e.to_string()))?;
                if !status.success() {
                    return Err(SpeechError::Synthesis(format!("{} exited with {status}", self.program)));
                }
                Ok(())
            }
            _ = self.stop.notified() => {
                let _ = child.kill().await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOICES: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  en-us           --/M      English_(America)  gmw/en-US            (en 3)
 5  ja              --/M      Japanese           jpx/ja
";

    fn utterance(voice: Option<Voice>) -> Utterance {
        Utterance {
            text: "こんにちは".into(),
            language_tag: "ja-JP".into(),
            voice,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }

    #[test]
    fn parses_voice_table() {
        let voices = parse_voice_table(VOICES);
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].name, "English (America)");
        assert_eq!(voices[1].language_tag, "ja");
        assert_eq!(voices[1].name, "Japanese");
    }

    #[test]
    fn maps_prosody_onto_espeak_flags() {
        let voice = parse_voice_table(VOICES).pop();
        let args = speak_args(&utterance(voice));
        assert_eq!(
            args,
            ["-v", "ja", "-s", "175", "-p", "50", "-a", "100", "--stdin"]
        );
    }

    #[test]
    fn falls_back_to_language_tag_without_voice() {
        let args = speak_args(&utterance(None));
        assert_eq!(args[1], "ja-jp");
    }
}
