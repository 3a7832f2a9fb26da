//! Settings types and JSON persistence.
//!
//! Settings are persisted to `~/.config/mailgauge/settings.json` (or the
//! platform equivalent) and loaded before each run. Defaults match the
//! hardcoded sets the dashboard shipped with.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::{Classifier, DEFAULT_IMPORTANT_DOMAINS, DEFAULT_IMPORTANT_KEYWORDS};

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Classifier rule configuration.
    #[serde(default)]
    pub classifier: ClassifierSettings,
    /// Default sender lists applied when a request carries none.
    #[serde(default)]
    pub lists: ListSettings,
}

/// Classifier rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Domain suffixes that mark a sender as important.
    pub important_domains: Vec<String>,
    /// Subject keywords that mark a message as important.
    pub important_keywords: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            important_domains: DEFAULT_IMPORTANT_DOMAINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            important_keywords: DEFAULT_IMPORTANT_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ClassifierSettings {
    /// Builds a classifier from these settings.
    pub fn build(&self) -> Classifier {
        Classifier::new(
            self.important_domains.iter().cloned(),
            self.important_keywords.iter().cloned(),
        )
    }
}

/// Default whitelist/blacklist entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSettings {
    /// Sender fragments marking messages as important.
    pub whitelist: Vec<String>,
    /// Sender fragments forcing messages to `Other`.
    pub blacklist: Vec<String>,
}

impl Settings {
    /// Returns the default settings file location for this platform.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "panbanda", "mailgauge")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Loads settings from a file, falling back to defaults when the
    /// file does not exist yet.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Saves settings as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}
