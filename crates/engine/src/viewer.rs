//! The host boundary: whoever looks at an interface and receives its effects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A viewer of an interface, implemented by the host.
///
/// Every side effect a behavior can have goes through this trait, so the
/// engine stays independent of any concrete server API.
pub trait Viewer: Send + Sync {
    fn name(&self) -> &str;

    fn has_permission(&self, permission: &str) -> bool;

    /// Send a (rich text) message to this viewer only.
    fn send_message(&self, message: &str);

    /// Send a (rich text) message to everyone on the server.
    fn broadcast(&self, message: &str);

    /// Run a command as this viewer.
    fn perform_command(&self, command: &str);

    /// Run a command as the server console.
    fn run_console_command(&self, command: &str);

    /// Play a sound at the viewer's location.
    fn play_sound(&self, sound: &Sound);
}

/// Mixer channel a sound plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCategory {
    #[default]
    Master,
    Music,
    Records,
    Weather,
    Blocks,
    Hostile,
    Neutral,
    Players,
    Ambient,
    Voice,
    Ui,
}

impl SoundCategory {
    pub const ALL: [SoundCategory; 11] = [
        Self::Master,
        Self::Music,
        Self::Records,
        Self::Weather,
        Self::Blocks,
        Self::Hostile,
        Self::Neutral,
        Self::Players,
        Self::Ambient,
        Self::Voice,
        Self::Ui,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Music => "music",
            Self::Records => "records",
            Self::Weather => "weather",
            Self::Blocks => "blocks",
            Self::Hostile => "hostile",
            Self::Neutral => "neutral",
            Self::Players => "players",
            Self::Ambient => "ambient",
            Self::Voice => "voice",
            Self::Ui => "ui",
        }
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SoundCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.id() == lower)
            .ok_or_else(|| format!("unknown sound category: {s}"))
    }
}

/// A fully resolved sound effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    /// Namespaced sound key, e.g. `minecraft:ui.button.click`.
    pub key: String,
    pub category: SoundCategory,
    pub volume: f32,
    pub pitch: f32,
    pub seed: i64,
}

impl Sound {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            category: SoundCategory::Master,
            volume: 1.0,
            pitch: 1.0,
            seed: 0,
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, volume {}, pitch {}, seed {})",
            self.key, self.category, self.volume, self.pitch, self.seed
        )
    }
}
