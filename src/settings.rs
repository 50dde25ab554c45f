//! Game settings and preferences
//!
//! Read once at startup (JSON from the environment in the native binary)
//! and handed to the audio backend; never mutated at runtime.

use serde::{Deserialize, Serialize};

/// Volume preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Music volume scale (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effect volume scale (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Effective volume for a one-shot effect registered at `base`.
    pub fn effective_sfx(&self, base: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (base * self.sfx_volume.clamp(0.0, 1.0)).max(0.0)
        }
    }

    /// Effective volume for the looping track requested at `base`.
    pub fn effective_music(&self, base: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (base * self.music_volume.clamp(0.0, 1.0)).max(0.0)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
