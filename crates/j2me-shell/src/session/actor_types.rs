//! Session actor protocol and configuration.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::runtime::{AppRuntime, KeyEvent};
use crate::store::{ArchiveSummary, Vault};

use super::controller::{ArchiveFile, SessionInfo};
use super::error::SessionError;
use super::scheduler::DEFAULT_FRAME_RATE;

// ============================================================================
// Session Command
// ============================================================================

type Reply<T> = oneshot::Sender<Result<T, SessionError>>;

/// Commands that can be sent to the session actor.
pub enum SessionCommand {
    // Transitions
    LoadArchive {
        file: ArchiveFile,
        reply: Reply<ArchiveSummary>,
    },
    Launch {
        name: String,
        reply: Reply<()>,
    },
    Pause {
        reply: Reply<()>,
    },
    Resume {
        reply: Reply<()>,
    },
    Stop {
        reply: Reply<()>,
    },

    // Input
    Key {
        event: KeyEvent,
        reply: oneshot::Sender<bool>,
    },

    // Persistence
    SaveState {
        reply: Reply<bool>,
    },

    // Read operations
    GetInfo {
        reply: oneshot::Sender<SessionInfo>,
    },
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for spawning the session actor.
pub struct ActorConfig {
    pub vault: Vault,
    pub runtime: Box<dyn AppRuntime>,
    /// Frames per second delivered while Running.
    pub frame_rate: u32,
    /// Period between automatic state saves while Running. `None` disables.
    pub auto_save: Option<Duration>,
    /// Save the runtime's state when the session stops.
    pub save_on_stop: bool,
}

impl ActorConfig {
    pub fn new(vault: Vault, runtime: Box<dyn AppRuntime>) -> Self {
        Self {
            vault,
            runtime,
            frame_rate: DEFAULT_FRAME_RATE,
            auto_save: None,
            save_on_stop: true,
        }
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Channel capacity for commands.
///
/// Key events arrive in bursts; if this fills up, senders wait.
pub const CHANNEL_CAPACITY: usize = 64;
