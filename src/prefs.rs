//! User preferences persisted locally.
//!
//! Preferences never travel to the remote task store; they are a local
//! document behind [`DocumentStore`]. The core only stores and serves
//! them — acting on the sound flag or the theme name is presentation's
//! business.

use crate::local::{DocumentStore, LocalStoreResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const fn default_confirm_delete() -> bool {
    true
}

const fn default_sound_enabled() -> bool {
    true
}

fn default_theme() -> String {
    "default".to_owned()
}

/// View and behavior preferences for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    hide_completed: bool,
    #[serde(default = "default_confirm_delete")]
    confirm_delete: bool,
    #[serde(default)]
    auto_refresh_secs: u64,
    #[serde(default = "default_sound_enabled")]
    sound_enabled: bool,
    #[serde(default = "default_theme")]
    theme: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            hide_completed: false,
            confirm_delete: default_confirm_delete(),
            auto_refresh_secs: 0,
            sound_enabled: default_sound_enabled(),
            theme: default_theme(),
        }
    }
}

impl Preferences {
    /// Loads the persisted preferences, falling back to defaults when
    /// nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::local::LocalStoreError`] when the document store
    /// cannot be read.
    pub fn load_or_default(store: &impl DocumentStore<Self>) -> LocalStoreResult<Self> {
        Ok(store.load()?.unwrap_or_default())
    }

    /// Persists the preferences.
    ///
    /// # Errors
    ///
    /// Returns [`crate::local::LocalStoreError`] when the document cannot
    /// be written.
    pub fn persist(&self, store: &impl DocumentStore<Self>) -> LocalStoreResult<()> {
        store.save(self)
    }

    /// Returns `true` when the complete column is hidden from the board.
    #[must_use]
    pub const fn hide_completed(&self) -> bool {
        self.hide_completed
    }

    /// Sets whether the complete column is hidden.
    pub const fn set_hide_completed(&mut self, hide: bool) {
        self.hide_completed = hide;
    }

    /// Returns `true` when deleting a task requires confirmation.
    #[must_use]
    pub const fn confirm_delete(&self) -> bool {
        self.confirm_delete
    }

    /// Sets whether deleting a task requires confirmation.
    pub const fn set_confirm_delete(&mut self, confirm: bool) {
        self.confirm_delete = confirm;
    }

    /// Returns the auto-refresh interval in seconds; zero means disabled.
    #[must_use]
    pub const fn auto_refresh_secs(&self) -> u64 {
        self.auto_refresh_secs
    }

    /// Sets the auto-refresh interval in seconds; zero disables it.
    pub const fn set_auto_refresh_secs(&mut self, secs: u64) {
        self.auto_refresh_secs = secs;
    }

    /// Returns the auto-refresh interval as a duration, `None` when
    /// disabled.
    #[must_use]
    pub const fn auto_refresh_interval(&self) -> Option<Duration> {
        if self.auto_refresh_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.auto_refresh_secs))
        }
    }

    /// Returns `true` when celebratory sound feedback is enabled.
    #[must_use]
    pub const fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Sets whether celebratory sound feedback is enabled.
    pub const fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Returns the theme name.
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Sets the theme name.
    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }
}
