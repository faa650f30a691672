//! Tick scheduling.
//!
//! The controller asks for at most one tick at a time through
//! [`TickScheduler::request_tick`] and withdraws it with
//! [`TickScheduler::cancel`]. A tick that was already handed out before a
//! cancel is still rejected by the controller through its ticket.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Identifies one requested tick.
///
/// `generation` changes every time the session leaves Running; `frame` is
/// the index of the frame the tick should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTicket {
    pub generation: u64,
    pub frame: u64,
}

/// Source of frame-paced ticks.
pub trait TickScheduler: Send {
    /// Arrange for `ticket` to be delivered at the next frame boundary.
    ///
    /// Replaces any ticket already pending.
    fn request_tick(&mut self, ticket: TickTicket);

    /// Drop the pending ticket, if any.
    fn cancel(&mut self);
}

// ============================================================================
// FramePacer
// ============================================================================

/// Default display refresh rate.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Tokio-driven scheduler that releases ticks at a fixed refresh rate.
///
/// Missed frame boundaries are skipped rather than replayed, so a slow tick
/// never produces a burst of catch-up ticks.
pub struct FramePacer {
    interval: Interval,
    pending: Option<TickTicket>,
}

impl FramePacer {
    /// Create a pacer for `frame_rate` frames per second (minimum 1).
    ///
    /// Must be called within a tokio runtime.
    pub fn new(frame_rate: u32) -> Self {
        Self {
            interval: skipping_interval(frame_period(frame_rate)),
            pending: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    pub fn pending(&self) -> Option<TickTicket> {
        self.pending
    }

    /// Wait for the next frame boundary and release the pending ticket.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future keeps the ticket pending.
    pub async fn next_tick(&mut self) -> TickTicket {
        let Some(ticket) = self.pending else {
            return std::future::pending().await;
        };
        self.interval.tick().await;
        self.pending = None;
        ticket
    }
}

impl TickScheduler for FramePacer {
    fn request_tick(&mut self, ticket: TickTicket) {
        self.pending = Some(ticket);
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Duration of one frame at `frame_rate` frames per second.
pub fn frame_period(frame_rate: u32) -> Duration {
    Duration::from_secs(1) / frame_rate.max(1)
}

/// Interval whose first tick is one `period` from now and which skips
/// missed ticks instead of bursting to catch up.
pub fn skipping_interval(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

// ============================================================================
// ManualScheduler
// ============================================================================

/// Scheduler for hosts that own the display refresh loop.
///
/// The host takes the pending ticket on each refresh callback and passes it
/// to the controller.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<TickTicket>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<TickTicket> {
        self.pending
    }

    /// Take the pending ticket for delivery.
    pub fn take_pending(&mut self) -> Option<TickTicket> {
        self.pending.take()
    }

    /// Number of `request_tick` calls so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Number of `cancel` calls so far.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self, ticket: TickTicket) {
        self.pending = Some(ticket);
        self.requested += 1;
    }

    fn cancel(&mut self) {
        self.pending = None;
        self.cancelled += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET: TickTicket = TickTicket {
        generation: 1,
        frame: 0,
    };

    #[test]
    fn frame_period_values() {
        assert_eq!(frame_period(60), Duration::from_secs(1) / 60);
        assert_eq!(frame_period(0), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn skipping_interval_does_not_burst() {
        let interval = skipping_interval(Duration::from_secs(60));
        assert_eq!(interval.period(), Duration::from_secs(60));
        assert_eq!(interval.missed_tick_behavior(), MissedTickBehavior::Skip);

        let pacer = FramePacer::new(30);
        assert_eq!(pacer.interval.missed_tick_behavior(), MissedTickBehavior::Skip);
    }

    #[test]
    fn manual_request_and_cancel() {
        let mut scheduler = ManualScheduler::new();
        scheduler.request_tick(TICKET);
        assert_eq!(scheduler.pending(), Some(TICKET));

        scheduler.cancel();
        assert_eq!(scheduler.take_pending(), None);
        assert_eq!(scheduler.requested(), 1);
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[tokio::test]
    async fn pacer_releases_requested_ticket() {
        let mut pacer = FramePacer::new(200);
        pacer.request_tick(TICKET);

        let ticket = tokio::time::timeout(Duration::from_secs(1), pacer.next_tick())
            .await
            .unwrap();
        assert_eq!(ticket, TICKET);
        assert!(pacer.pending().is_none());
    }

    #[tokio::test]
    async fn pacer_idle_without_request() {
        let mut pacer = FramePacer::new(200);

        let result = tokio::time::timeout(Duration::from_millis(50), pacer.next_tick()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn pacer_cancel_withdraws_ticket() {
        let mut pacer = FramePacer::new(200);
        pacer.request_tick(TICKET);
        pacer.cancel();

        let result = tokio::time::timeout(Duration::from_millis(50), pacer.next_tick()).await;
        assert!(result.is_err());
    }
}
