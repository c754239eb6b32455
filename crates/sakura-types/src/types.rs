use serde::{Deserialize, Serialize};

use crate::lexicon::LexiconEntry;
use crate::message::Message;

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI -> app
    TextInput(String),
    VoiceInput,
    SpeakText {
        text: String,
        language_tag: String,
    },
    FetchWordOfTheDay,
    SpeakWordOfTheDay,
    ToggleTheme,
    DismissError,
    Quit,

    // app -> UI
    ShowMessages(Vec<Message>),
    ShowWordOfTheDay(LexiconEntry),
    ShowError(Option<String>),
    ThemeChanged(Theme),
    BusyChanged(bool),
    BackendReady,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
