//! Cancellable periodic work.

use crate::prefs::Preferences;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A recurring background task with an explicit lifecycle.
///
/// Tickers drive the once-per-second display recompute and the optional
/// auto-refresh poll. They are owned values tied to the consuming view:
/// dropping or [`Ticker::stop`]ping one cancels its schedule, so no
/// recurring work leaks after the view is torn down. The display tick
/// and the auto-refresh poll are independent tickers with no mutual
/// coordination.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Runs `tick` every `period`, starting one period from now.
    ///
    /// Sub-millisecond periods are clamped to one millisecond. Missed
    /// ticks are skipped, not replayed.
    pub fn every<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let clamped = period.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(clamped);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                tick().await;
            }
        });
        Self { handle }
    }

    /// Runs `tick` once per second — the display refresh cadence.
    pub fn every_second<F, Fut>(tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        Self::every(Duration::from_secs(1), tick)
    }

    /// Starts an auto-refresh poll at the preferred interval.
    ///
    /// Returns `None` when auto-refresh is disabled (interval zero).
    pub fn auto_refresh<F, Fut>(prefs: &Preferences, tick: F) -> Option<Self>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        prefs
            .auto_refresh_interval()
            .map(|period| Self::every(period, tick))
    }

    /// Cancels the schedule.
    pub fn stop(self) {
        self.handle.abort();
    }

    /// Returns `true` when the schedule has been cancelled or has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
