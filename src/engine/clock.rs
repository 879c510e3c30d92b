use chrono::{Local, NaiveDate};

/// Source of "today" for every date-relative computation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day. Used for pinned deployments and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_never_moves() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let clock = FixedClock::new(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.today(), day);
    }

    #[test]
    fn system_clock_reports_local_date() {
        let clock = SystemClock::new();
        let before = Local::now().date_naive();
        let today = clock.today();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
