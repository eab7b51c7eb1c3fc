use chrono::{Local, NaiveDate};
use eco_core::ports::ClockPort;

/// Local calendar date, used for birth-date checks.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
