//! Tick scheduling
//!
//! The engine never owns a timer directly. It is handed a [`TickScheduler`]
//! and tells it when to start (on reset) and when to stop (on game over).
//! The live game uses [`IntervalScheduler`], whose paired [`TickTimer`] is
//! awaited by the event loop. Tests use [`ManualScheduler`] and call
//! `tick()` by hand.

pub mod interval;

pub use interval::{IntervalScheduler, TickTimer};

use std::time::Duration;

/// Something that can invoke the engine's tick at a fixed rate
pub trait TickScheduler {
    /// Start ticking every `period`, replacing any timer already running
    fn start(&mut self, period: Duration);

    /// Stop ticking. Calling this while inactive is a no-op.
    fn cancel(&mut self);

    /// Whether a timer is currently installed
    fn is_active(&self) -> bool;
}

/// Scheduler that only records what it was asked to do
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ManualScheduler {
    period: Option<Duration>,
    /// Number of times `start` was called
    pub starts: usize,
    /// Number of times an active timer was cancelled
    pub cancels: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period of the active timer, if any
    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        self.cancel();
        self.period = Some(period);
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.period.take().is_some() {
            self.cancels += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.period.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_start_replaces_timer() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.is_active());

        scheduler.start(Duration::from_millis(100));
        assert!(scheduler.is_active());
        assert_eq!(scheduler.starts, 1);
        assert_eq!(scheduler.cancels, 0);

        scheduler.start(Duration::from_millis(50));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(50)));
        assert_eq!(scheduler.starts, 2);
        assert_eq!(scheduler.cancels, 1);
    }

    #[test]
    fn test_manual_scheduler_cancel_idempotent() {
        let mut scheduler = ManualScheduler::new();
        scheduler.cancel();
        assert_eq!(scheduler.cancels, 0);

        scheduler.start(Duration::from_millis(100));
        scheduler.cancel();
        scheduler.cancel();
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.cancels, 1);
    }
}
