use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use sakura_types::Theme;

/// Key the theme flag is stored under
pub const THEME_KEY: &str = "theme";

const PREFERENCES_FILE: &str = "preferences.json";

/// Small persisted key-value store for user preferences
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory, if one can be determined
    pub fn in_data_dir() -> Option<Self> {
        let dirs = ProjectDirs::from("dev", "sakura", "sakura")?;
        Some(Self::new(dirs.data_dir().join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Saved theme, light when nothing usable is stored
    pub fn theme(&self) -> Theme {
        match self.get(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn save_theme(&self, theme: Theme) -> anyhow::Result<()> {
        self.set(THEME_KEY, theme.as_str())
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(data) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable preferences {}: {e}", self.path.display());
            BTreeMap::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn theme_round_trips_under_fixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let store = PreferenceStore::new(&path);

        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.theme(), Theme::Dark);

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get(THEME_KEY).map(String::as_str), Some("dark"));
    }

    #[test]
    fn corrupt_file_falls_back_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let store = PreferenceStore::new(&path);
        assert_eq!(store.theme(), Theme::Light);
    }
}
