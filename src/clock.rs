//! Time source used to stamp `created_at`
//!
//! The engine only asks for `Clock::utc`. Production wiring uses
//! `mockable::DefaultClock`; `SteppingClock` yields strictly increasing
//! instants for reproducible runs.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

pub use mockable::DefaultClock;

/// Shared clock handle
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Returns the wall clock.
pub fn system_clock() -> SharedClock {
    Arc::new(DefaultClock)
}

/// Clock that starts at a fixed instant and advances by `step` on every read.
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// Starts at `start` and advances one second per read.
    pub fn per_second(start: DateTime<Utc>) -> Self {
        Self::new(start, TimeDelta::seconds(1))
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = match self.next.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = *next;
        *next = now + self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stepping_clock_advances() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let clock = SteppingClock::per_second(start);

        assert_eq!(clock.utc(), start);
        assert_eq!(clock.utc(), start + TimeDelta::seconds(1));
        assert!(clock.utc() > start);
    }

    #[test]
    fn test_zero_step_is_frozen() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let clock = SteppingClock::new(start, TimeDelta::zero());
        assert_eq!(clock.utc(), clock.utc());
    }
}
