use chrono::NaiveDateTime;

/// Source of the current time
///
/// Competition dates are stored without a timezone, so this returns the local wall-clock time.
#[mockall::automock]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
