use chrono::NaiveDate;

pub trait ClockPort: Send + Sync {
    /// Local calendar date, used for birth date checks.
    fn today(&self) -> NaiveDate;
}
