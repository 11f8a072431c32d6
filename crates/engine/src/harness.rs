//! A viewer that records every effect it receives.
//!
//! `RecordingViewer` answers permission checks from a fixed set and keeps an
//! ordered log of messages, commands and sounds. Tests assert on that log;
//! the CLI drains it after each step of an interaction and prints it.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use crate::viewer::{Sound, Viewer};

/// One side effect observed by a `RecordingViewer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Effect {
    Message(String),
    Broadcast(String),
    Command(String),
    ConsoleCommand(String),
    Sound(Sound),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(text) => write!(f, "message: {text}"),
            Self::Broadcast(text) => write!(f, "broadcast: {text}"),
            Self::Command(text) => write!(f, "command: {text}"),
            Self::ConsoleCommand(text) => write!(f, "console command: {text}"),
            Self::Sound(sound) => write!(f, "sound: {sound}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingViewer {
    name: String,
    permissions: HashSet<String>,
    effects: Mutex<Vec<Effect>>,
}

impl RecordingViewer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: HashSet::new(),
            effects: Mutex::new(Vec::new()),
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn drain(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.lock())
    }

    pub fn messages(&self) -> Vec<String> {
        self.collect(|e| match e {
            Effect::Message(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.collect(|e| match e {
            Effect::Broadcast(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn commands(&self) -> Vec<String> {
        self.collect(|e| match e {
            Effect::Command(c) => Some(c.clone()),
            _ => None,
        })
    }

    pub fn console_commands(&self) -> Vec<String> {
        self.collect(|e| match e {
            Effect::ConsoleCommand(c) => Some(c.clone()),
            _ => None,
        })
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.collect(|e| match e {
            Effect::Sound(s) => Some(s.clone()),
            _ => None,
        })
    }

    fn collect<T>(&self, f: impl Fn(&Effect) -> Option<T>) -> Vec<T> {
        self.lock().iter().filter_map(f).collect()
    }

    fn push(&self, effect: Effect) {
        tracing::debug!(viewer = %self.name, effect = %effect, "effect");
        self.lock().push(effect);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Effect>> {
        // A panicking test thread must not hide the log from the others
        self.effects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Viewer for RecordingViewer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    fn send_message(&self, message: &str) {
        self.push(Effect::Message(message.to_string()));
    }

    fn broadcast(&self, message: &str) {
        self.push(Effect::Broadcast(message.to_string()));
    }

    fn perform_command(&self, command: &str) {
        self.push(Effect::Command(command.to_string()));
    }

    fn run_console_command(&self, command: &str) {
        self.push(Effect::ConsoleCommand(command.to_string()));
    }

    fn play_sound(&self, sound: &Sound) {
        self.push(Effect::Sound(sound.clone()));
    }
}
