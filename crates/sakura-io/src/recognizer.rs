use std::process::Stdio;

use async_trait::async_trait;
use sakura_core::{RecognitionOptions, RecognitionPlatform, RecognitionResult, SpeechError};
use tokio::process::Command;

/// Runs an external listener that prints what it heard on stdout.
///
/// The requested language is passed through `SAKURA_SPEECH_LANG`; each
/// non-blank output line counts as one final result.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// Split a configured command line on whitespace
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

pub fn parse_transcripts(stdout: &str) -> Vec<RecognitionResult> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RecognitionResult::final_transcript)
        .collect()
}

#[async_trait]
impl RecognitionPlatform for CommandRecognizer {
    async fn recognize(
        &self,
        options: &RecognitionOptions,
    ) -> Result<Vec<RecognitionResult>, SpeechError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .env("SAKURA_SPEECH_LANG", &options.language_tag)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| SpeechError::Start(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            };
            return Err(SpeechError::Recognition(reason));
        }

        Ok(parse_transcripts(&String::from_utf8_lossy(&output.stdout)))
    }
}
