use kanal::AsyncSender;
use sakura_types::AppEvent;
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
Type Japanese and press enter to chat.
  /voice          speak instead of typing
  /word           fetch a new word of the day
  /say            hear the word of the day
  /speak <text>   hear any text
  /theme          switch light/dark
  /dismiss        hide the error banner
  /quit           leave";

/// Map one line of terminal input onto an app event
pub fn parse_command(line: &str, speech_tag: &str) -> Option<AppEvent> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Some(AppEvent::TextInput(line.to_string()));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    match name {
        "voice" | "v" => Some(AppEvent::VoiceInput),
        "word" | "w" => Some(AppEvent::FetchWordOfTheDay),
        "say" => Some(AppEvent::SpeakWordOfTheDay),
        "speak" if !rest.is_empty() => Some(AppEvent::SpeakText {
            text: rest.to_string(),
            language_tag: speech_tag.to_string(),
        }),
        "theme" => Some(AppEvent::ToggleTheme),
        "dismiss" => Some(AppEvent::DismissError),
        "quit" | "exit" | "q" => Some(AppEvent::Quit),
        _ => {
            println!("{HELP}");
            None
        }
    }
}

/// Watch stdin and forward every line to the app
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    speech_tag: String,
) -> anyhow::Result<()> {
    tracing::info!("Starting stdin watcher");

    let tx = event_tx.clone();
    tokio::select! {
        result = sakura_io::watch_stdin(move |line| {
            let Some(event) = parse_command(&line, &speech_tag) else {
                return;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Err(e) = tx.send(event).await {
                    tracing::error!("Failed to send input to app: {}", e);
                }
            });
        }) => {
            if let Err(e) = result {
                tracing::error!("Stdin watcher error: {}", e);
            }
            // EOF ends the session
            let _ = event_tx.send(AppEvent::Quit).await;
        }
        _ = cancel.cancelled() => {
            tracing::info!("Stdin watcher stopping");
        }
    }

    Ok(())
}
