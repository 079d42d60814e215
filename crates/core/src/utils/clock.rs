//! Clock abstraction for services.
//!
//! Services never call `Utc::now()` directly; they take a `Clock` so that
//! default effective dates and cache staleness checks are deterministic under
//! test.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current instant and the current business date.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_is_date_of_now() {
        let clock = SystemClock;
        assert_eq!(clock.today(), clock.now().date_naive());
    }
}
