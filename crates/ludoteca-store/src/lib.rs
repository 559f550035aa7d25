//! ludoteca-store — JSON file-backed device settings.
//!
//! Holds the selected child/classroom and accessibility preference flags.
//! Read once at startup and written only on explicit user action; nothing
//! else mutates the file concurrently.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Accessibility preference flags mirrored from the app settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessibility {
    #[serde(default)]
    pub high_contrast: bool,
    #[serde(default)]
    pub large_text: bool,
    #[serde(default)]
    pub audio_cues: bool,
}

/// Persisted device settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Selected child id (`criancaSelecionada` in the original app).
    #[serde(default)]
    pub selected_child: Option<String>,
    /// Selected classroom id (`turmaSelecionada`).
    #[serde(default)]
    pub selected_classroom: Option<String>,
    #[serde(default)]
    pub accessibility: Accessibility,
}

/// A settings file at a fixed path.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields defaults.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse settings: {}", self.path.display()))
    }

    /// Save settings, creating parent directories as needed.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json =
            serde_json::to_string_pretty(settings).context("failed to serialize settings")?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write settings: {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Update the selected child/classroom and persist immediately.
    pub fn select(
        &self,
        child: Option<String>,
        classroom: Option<String>,
    ) -> Result<Settings> {
        let mut settings = self.load()?;
        if child.is_some() {
            settings.selected_child = child;
        }
        if classroom.is_some() {
            settings.selected_classroom = classroom;
        }
        self.save(&settings)?;
        Ok(settings)
    }
}
