use std::collections::HashMap;

use kanal::AsyncReceiver;
use sakura_config::ui::UiConfig;
use sakura_types::{AppEvent, LexiconEntry, Message, MessageId, Sender, Theme};

use crate::io::HELP;

/// ANSI colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub user: &'static str,
    pub assistant: &'static str,
    pub muted: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme, ansi: bool) -> Self {
        if !ansi {
            return Self {
                user: "",
                assistant: "",
                muted: "",
                error: "",
                reset: "",
            };
        }

        match theme {
            Theme::Light => Self {
                user: "\x1b[34m",
                assistant: "\x1b[35m",
                muted: "\x1b[90m",
                error: "\x1b[31m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                user: "\x1b[96m",
                assistant: "\x1b[95m",
                muted: "\x1b[37m",
                error: "\x1b[91m",
                reset: "\x1b[0m",
            },
        }
    }
}

fn label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "あなた",
        Sender::Assistant => "さくら",
    }
}

/// Remembers what was printed so each snapshot only emits new lines
#[derive(Default)]
pub struct Transcript {
    // id -> translation already printed
    printed: HashMap<MessageId, bool>,
}

impl Transcript {
    pub fn render(
        &mut self,
        messages: &[Message],
        show_translations: bool,
        palette: &Palette,
    ) -> Vec<String> {
        let mut lines = Vec::new();

        for message in messages {
            let previous = self.printed.get(&message.id).copied();
            let colour = match message.sender {
                Sender::User => palette.user,
                Sender::Assistant => palette.assistant,
            };

            if previous.is_none() {
                lines.push(format!(
                    "{colour}{}:{} {}",
                    label(message.sender),
                    palette.reset,
                    message.primary_text
                ));
            }

            if let Some(secondary) = &message.secondary_text
                && show_translations
                && previous != Some(true)
            {
                let muted = palette.muted;
                let reset = palette.reset;
                if previous.is_none() {
                    lines.push(format!("    {muted}{secondary}{reset}"));
                } else {
                    lines.push(format!(
                        "    {muted}↳ 「{}」 {secondary}{reset}",
                        message.primary_text
                    ));
                }
            }

            self.printed
                .insert(message.id.clone(), message.secondary_text.is_some());
        }

        lines
    }
}

/// Terminal presentation state
pub struct Screen {
    transcript: Transcript,
    palette: Palette,
    show_translations: bool,
    ansi: bool,
}

impl Screen {
    pub fn new(config: &UiConfig, ansi: bool) -> Self {
        Self {
            transcript: Transcript::default(),
            palette: Palette::for_theme(Theme::default(), ansi),
            show_translations: config.show_translations,
            ansi,
        }
    }

    /// Lines to print for one app event
    pub fn apply(&mut self, event: AppEvent) -> Vec<String> {
        let Palette {
            muted,
            error,
            reset,
            ..
        } = self.palette;

        match event {
            AppEvent::ShowMessages(messages) => {
                self.transcript
                    .render(&messages, self.show_translations, &self.palette)
            }
            AppEvent::ShowWordOfTheDay(entry) => word_of_the_day_lines(&entry, &self.palette),
            AppEvent::ShowError(Some(message)) => {
                vec![format!("{error}! {message}{reset} {muted}(/dismiss){reset}")]
            }
            AppEvent::ThemeChanged(theme) => {
                self.palette = Palette::for_theme(theme, self.ansi);
                vec![format!("{}Theme: {}{}", self.palette.muted, theme.as_str(), self.palette.reset)]
            }
            AppEvent::BusyChanged(true) => vec![format!("{muted}…{reset}")],
            AppEvent::BackendReady => HELP.lines().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

fn word_of_the_day_lines(entry: &LexiconEntry, palette: &Palette) -> Vec<String> {
    let Palette {
        assistant,
        muted,
        reset,
        ..
    } = *palette;

    vec![
        format!("{muted}── Word of the day ──{reset}"),
        format!(
            "{assistant}{}{reset} ({}) {}",
            entry.word, entry.reading, entry.meaning
        ),
        format!("    {}", entry.example_source),
        format!("    {muted}{}{reset}", entry.example_target),
    ]
}

pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, config: UiConfig) -> anyhow::Result<()> {
    let mut screen = Screen::new(&config, atty::is(atty::Stream::Stdout));

    loop {
        let event = app_to_ui_rx.recv().await?;
        for line in screen.apply(event) {
            println!("{line}");
        }
    }
}
