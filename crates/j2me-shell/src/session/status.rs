use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Running,
    Paused,
    Stopped,
}

impl SessionStatus {
    /// Whether a new archive may be loaded from this state.
    pub fn accepts_load(self) -> bool {
        matches!(self, Self::Idle | Self::Stopped)
    }

    /// Whether an application is loaded (running or paused).
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
