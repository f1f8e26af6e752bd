use chrono::{Local, NaiveDate};

/// Source of the reference calendar day used for date-expression resolution.
///
/// Threaded explicitly so that "today", "tomorrow", and weekday arithmetic are
/// deterministic under test instead of reading ambient wall-clock time.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation: the local calendar day.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fixed-day implementation for tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Clock, FixedClock};

    #[test]
    fn fixed_clock_always_returns_its_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let clock = FixedClock(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.today(), day);
    }
}
