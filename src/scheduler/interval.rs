use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use super::TickScheduler;

/// Engine-side handle of a tokio interval timer.
///
/// Publishing a period (or `None`) over the watch channel is all it does; the
/// paired [`TickTimer`] owned by the event loop rebuilds its interval whenever
/// a new value arrives.
#[derive(Debug)]
pub struct IntervalScheduler {
    tx: watch::Sender<Option<Duration>>,
}

/// Loop-side half of [`IntervalScheduler`]
#[derive(Debug)]
pub struct TickTimer {
    rx: watch::Receiver<Option<Duration>>,
    interval: Option<Interval>,
    closed: bool,
}

impl IntervalScheduler {
    /// Create a scheduler and the timer it drives
    pub fn channel() -> (IntervalScheduler, TickTimer) {
        let (tx, rx) = watch::channel(None);
        (
            IntervalScheduler { tx },
            TickTimer {
                rx,
                interval: None,
                closed: false,
            },
        )
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        log::debug!("Starting tick timer every {:?}", period);
        self.tx.send_replace(Some(period));
    }

    fn cancel(&mut self) {
        if self.tx.send_replace(None).is_some() {
            log::debug!("Tick timer cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.tx.borrow().is_some()
    }
}

impl TickTimer {
    /// Wait for the next tick.
    ///
    /// Pends forever while no timer is installed. A `start` issued while
    /// waiting restarts the period from that moment.
    pub async fn tick(&mut self) {
        loop {
            if self.closed {
                return std::future::pending().await;
            }

            let changed = match self.interval.as_mut() {
                Some(interval) => {
                    tokio::select! {
                        _ = interval.tick() => return,
                        changed = self.rx.changed() => changed,
                    }
                }
                None => self.rx.changed().await,
            };

            if changed.is_err() {
                // Scheduler dropped: nothing can restart us
                self.closed = true;
                self.interval = None;
                continue;
            }
            self.rebuild();
        }
    }

    /// Whether an interval is installed on this side
    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    fn rebuild(&mut self) {
        let period = *self.rx.borrow_and_update();
        self.interval = period.map(|period| {
            // First tick lands one full period after start
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_timer_pends_until_started() {
        let (_scheduler, mut timer) = IntervalScheduler::channel();

        let result = timeout(Duration::from_secs(5), timer.tick()).await;
        assert!(result.is_err());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ticks_at_period() {
        let (mut scheduler, mut timer) = IntervalScheduler::channel();
        scheduler.start(Duration::from_millis(100));
        assert!(scheduler.is_active());

        let start = Instant::now();
        timer.tick().await;
        assert!(timer.is_armed());
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        timer.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (mut scheduler, mut timer) = IntervalScheduler::channel();
        scheduler.start(Duration::from_millis(100));
        timer.tick().await;

        scheduler.cancel();
        assert!(!scheduler.is_active());

        let result = timeout(Duration::from_secs(1), timer.tick()).await;
        assert!(result.is_err());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_phase() {
        let (mut scheduler, mut timer) = IntervalScheduler::channel();
        scheduler.start(Duration::from_millis(100));
        timer.tick().await;

        advance(Duration::from_millis(60)).await;
        scheduler.start(Duration::from_millis(100));

        let restarted = Instant::now();
        timer.tick().await;
        assert_eq!(restarted.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_scheduler_pends_forever() {
        let (scheduler, mut timer) = IntervalScheduler::channel();
        drop(scheduler);

        let result = timeout(Duration::from_secs(1), timer.tick()).await;
        assert!(result.is_err());
    }
}
