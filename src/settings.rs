//! Game settings and determinism hooks
//!
//! Persisted as JSON next to the score store. Loading falls back to defaults
//! on any error so a corrupt settings file never blocks a session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed. `None` seeds from entropy; set it to replay a session.
    pub seed: Option<u64>,
    /// Override for the score-store file location.
    pub scores_path: Option<PathBuf>,
    /// Frame cap for the demo binary so an unattended run always ends.
    pub demo_frame_cap: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            scores_path: None,
            // Two minutes at 60 Hz
            demo_frame_cap: 120 * 60,
        }
    }
}

impl Settings {
    /// Load from `path`, defaulting on a missing or unreadable file.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("settings file {} is corrupt ({e}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Best-effort save; errors are logged and swallowed.
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("cannot serialize settings: {e}");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("cannot create {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = std::fs::write(path, json) {
            log::warn!("cannot write settings to {}: {e}", path.display());
        }
    }
}
