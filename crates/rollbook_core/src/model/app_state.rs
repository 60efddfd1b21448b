//! Application-level records kept at fixed paths: user settings and UI state.

use crate::model::record::{Record, RecordKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "School Database System";

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(skip)]
    path: PathBuf,
    /// Open the main window maximized.
    pub expand: bool,
    /// Reopen the page that was active at last shutdown.
    pub restore_last: bool,
    /// Main window title.
    pub title: String,
}

impl Settings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expand: false,
            restore_last: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn restore_defaults(&mut self) {
        self.expand = false;
        self.restore_last = false;
        self.title = DEFAULT_TITLE.to_string();
    }
}

impl Record for Settings {
    const KIND: RecordKind = RecordKind::Settings;

    fn path(&self) -> &Path {
        &self.path
    }

    fn bind_path(&mut self, path: PathBuf) {
        self.path = path;
    }
}

/// Persisted navigation state of the presentation shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(skip)]
    path: PathBuf,
    pub current_page: Option<String>,
    pub previous_page: Option<String>,
}

impl AppState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current_page: None,
            previous_page: None,
        }
    }

    /// Moves to `page`, remembering the page it leaves.
    pub fn navigate(&mut self, page: impl Into<String>) {
        let page = page.into();
        if self.current_page.as_deref() == Some(page.as_str()) {
            return;
        }
        self.previous_page = self.current_page.replace(page);
    }
}

impl Record for AppState {
    const KIND: RecordKind = RecordKind::AppState;

    fn path(&self) -> &Path {
        &self.path
    }

    fn bind_path(&mut self, path: PathBuf) {
        self.path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, Settings, DEFAULT_TITLE};

    #[test]
    fn restore_defaults_resets_every_setting() {
        let mut settings = Settings::new("settings.rec");
        settings.expand = true;
        settings.restore_last = true;
        settings.title = "Custom".to_string();

        settings.restore_defaults();
        assert!(!settings.expand);
        assert!(!settings.restore_last);
        assert_eq!(settings.title, DEFAULT_TITLE);
    }

    #[test]
    fn navigate_tracks_previous_page() {
        let mut state = AppState::new("appstate.rec");
        state.navigate("homepage");
        state.navigate("newpage");
        assert_eq!(state.current_page.as_deref(), Some("newpage"));
        assert_eq!(state.previous_page.as_deref(), Some("homepage"));

        state.navigate("newpage");
        assert_eq!(state.previous_page.as_deref(), Some("homepage"));
    }
}
