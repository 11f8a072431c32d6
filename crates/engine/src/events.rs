//! Event data carried into click and close behaviors.
//!
//! The host translates its own click/close events into these types before
//! calling `Interface::dispatch` or `Interface::run_close`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a cell was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    #[default]
    Left,
    ShiftLeft,
    Right,
    ShiftRight,
    Middle,
    /// Hotbar number key; the auxiliary index carries the hotbar slot.
    NumberKey,
    DoubleClick,
    Drop,
    ControlDrop,
    SwapOffhand,
    WindowBorderLeft,
    WindowBorderRight,
    Creative,
    Unknown,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 14] = [
        Self::Left,
        Self::ShiftLeft,
        Self::Right,
        Self::ShiftRight,
        Self::Middle,
        Self::NumberKey,
        Self::DoubleClick,
        Self::Drop,
        Self::ControlDrop,
        Self::SwapOffhand,
        Self::WindowBorderLeft,
        Self::WindowBorderRight,
        Self::Creative,
        Self::Unknown,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::ShiftLeft => "shift_left",
            Self::Right => "right",
            Self::ShiftRight => "shift_right",
            Self::Middle => "middle",
            Self::NumberKey => "number_key",
            Self::DoubleClick => "double_click",
            Self::Drop => "drop",
            Self::ControlDrop => "control_drop",
            Self::SwapOffhand => "swap_offhand",
            Self::WindowBorderLeft => "window_border_left",
            Self::WindowBorderRight => "window_border_right",
            Self::Creative => "creative",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_shift_click(&self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == lower)
            .ok_or_else(|| format!("unknown interaction kind: {s}"))
    }
}

/// Why an open interface was closed.
///
/// Forwarded to close behaviors; behaviors compiled from documents ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    #[default]
    Unknown,
    Teleport,
    CantUse,
    Unloaded,
    OpenNew,
    Player,
    Disconnect,
    Death,
    Plugin,
}

impl CloseReason {
    pub const ALL: [CloseReason; 9] = [
        Self::Unknown,
        Self::Teleport,
        Self::CantUse,
        Self::Unloaded,
        Self::OpenNew,
        Self::Player,
        Self::Disconnect,
        Self::Death,
        Self::Plugin,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Teleport => "teleport",
            Self::CantUse => "cant_use",
            Self::Unloaded => "unloaded",
            Self::OpenNew => "open_new",
            Self::Player => "player",
            Self::Disconnect => "disconnect",
            Self::Death => "death",
            Self::Plugin => "plugin",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CloseReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|reason| reason.id() == lower)
            .ok_or_else(|| format!("unknown close reason: {s}"))
    }
}
