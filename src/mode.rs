//! Control mode arbitration
//!
//! Exactly one mode is active process-wide. The arbiter is the only
//! holder of the value; the input path writes it and the frame loop
//! reads it through the same exclusive accessor, so a reader can never
//! observe a half-written mode. Last write wins, no queued transitions.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// The active input-to-output mapping discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Finger edges trigger per-channel sweeps.
    Gesture,
    /// Audio loudness drives all channels directly.
    Audio,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Gesture
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Gesture => write!(f, "gesture"),
            Mode::Audio => write!(f, "audio"),
        }
    }
}

/// Shared, exclusively accessed holder of the active [`Mode`].
#[derive(Debug, Clone, Default)]
pub struct ModeArbiter {
    inner: Arc<Mutex<Mode>>,
}

impl ModeArbiter {
    pub fn new(initial: Mode) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn get(&self) -> Mode {
        *self.lock()
    }

    pub fn set(&self, mode: Mode) {
        *self.lock() = mode;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Mode> {
        // A poisoned lock still guards a valid Mode value
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
