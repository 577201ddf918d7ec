//! Progress reporting types.
//!
//! Progress is modelled as a single percentage plus a status line that the
//! poller mutates and the presentation layer observes through
//! [`ProgressEvent`]s.

use serde::{Deserialize, Serialize};

/// Highest percentage reported before a result is actually retrieved.
pub const PROGRESS_CEILING: u8 = 99;

/// Status line shown while jobs are running.
pub const IN_PROGRESS_TEXT: &str = "Video generation in action...";

/// Status line shown once progress hits [`PROGRESS_CEILING`].
pub const SLOW_PROGRESS_TEXT: &str = "Video generation is taking longer than usual, hang tight!";

/// A change to the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Progress update (0-100) with the current status line
    Update { percent: u8, message: String },
    /// Indicator hidden (batch finished or failed)
    Cleared,
}

impl ProgressEvent {
    /// Create a progress update.
    pub fn update(percent: u8, message: impl Into<String>) -> Self {
        Self::Update {
            percent: percent.min(100),
            message: message.into(),
        }
    }

    /// Initial indicator shown before any work starts.
    pub fn started() -> Self {
        Self::update(0, IN_PROGRESS_TEXT)
    }

    pub fn percent(&self) -> Option<u8> {
        match self {
            ProgressEvent::Update { percent, .. } => Some(*percent),
            ProgressEvent::Cleared => None,
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, ProgressEvent::Cleared)
    }
}

/// Current value of the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub percent: u8,
    pub message: String,
    pub active: bool,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            percent: 0,
            message: IN_PROGRESS_TEXT.to_string(),
            active: true,
        }
    }
}

impl ProgressState {
    /// Advance by one unit, clamped at [`PROGRESS_CEILING`].
    ///
    /// The status line switches to [`SLOW_PROGRESS_TEXT`] once the clamp
    /// is reached and stays there.
    pub fn advance(&mut self) {
        self.percent = self.percent.saturating_add(1).min(PROGRESS_CEILING);
        if self.percent == PROGRESS_CEILING {
            self.message = SLOW_PROGRESS_TEXT.to_string();
        }
    }

    /// Hide the indicator.
    pub fn clear(&mut self) {
        self.percent = 0;
        self.message.clear();
        self.active = false;
    }

    /// Event describing the current state.
    pub fn to_event(&self) -> ProgressEvent {
        if self.active {
            ProgressEvent::update(self.percent, self.message.clone())
        } else {
            ProgressEvent::Cleared
        }
    }
}
