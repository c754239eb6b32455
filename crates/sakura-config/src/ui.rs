use serde::{Deserialize, Serialize};

use crate::{env_flag, env_string};

fn default_avatar() -> Option<String> {
    Some("/assets/images/sakura-avatar.png".to_string())
}

fn default_show_translations() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Avatar reference attached to assistant messages
    #[serde(default = "default_avatar")]
    pub avatar: Option<String>,
    #[serde(default = "default_show_translations")]
    pub show_translations: bool,
}

impl UiConfig {
    pub fn new() -> Self {
        Self {
            avatar: env_string("SAKURA_AVATAR").or_else(default_avatar),
            show_translations: env_flag("SAKURA_SHOW_TRANSLATIONS")
                .unwrap_or_else(default_show_translations),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            avatar: default_avatar(),
            show_translations: default_show_translations(),
        }
    }
}
