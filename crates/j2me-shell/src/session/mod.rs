//! Emulator session.
//!
//! # Architecture
//!
//! ```text
//!  ┌─────────────────┐  mpsc   ┌──────────────────────────────┐
//!  │  SessionHandle  │────────▶│ SessionActor (tokio task)    │
//!  │  (cloneable)    │         │  ┌────────────────────────┐  │
//!  └────────▲────────┘         │  │ SessionController      │  │
//!           │ watch            │  │  status, generation    │  │
//!           └──────────────────┼──│  AppRuntime            │  │
//!                              │  │  FramePacer ── ticks ──┼──┼─▶ update/render
//!                              │  └──────────┬─────────────┘  │
//!                              └─────────────┼────────────────┘
//!                                            ▼
//!                                  AssetStore / SessionStateStore
//! ```
//!
//! - **SessionController**: the state machine. Usable directly with a
//!   [`ManualScheduler`] when the host owns the refresh loop.
//! - **SessionActor**: runs the controller, its frame pacer and the
//!   auto-save timer on one task.
//! - **SessionHandle**: async front end; publishes status through a
//!   `watch` channel.

mod actor;
mod actor_types;
mod controller;
mod error;
mod handle;
mod scheduler;
mod status;

pub use actor::SessionActor;
pub use actor_types::{ActorConfig, CHANNEL_CAPACITY, SessionCommand};
pub use controller::{ArchiveFile, SessionController, SessionInfo, TickOutcome};
pub use error::{LoadFailure, SessionError};
pub use handle::SessionHandle;
pub use scheduler::{
    DEFAULT_FRAME_RATE, FramePacer, ManualScheduler, TickScheduler, TickTicket, frame_period,
    skipping_interval,
};
pub use status::SessionStatus;
