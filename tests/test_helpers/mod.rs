//! Shared helpers for behaviour and integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};

/// Deterministic clock whose time only moves when a test advances it.
///
/// Clones share the same instant, so a clock handed to the engine under
/// test can be advanced from step definitions.
#[derive(Debug, Clone)]
pub struct FakeClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FakeClock {
    /// Creates a clock frozen at an arbitrary fixed instant.
    #[must_use]
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 14, 9, 0, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH);
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, seconds: i64) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += Duration::seconds(seconds);
    }
}

impl Clock for FakeClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}
