//! Parking cost calculation.

use chrono::{DateTime, Utc};

/// Minimum billable duration: one minute, expressed in hours.
pub const MIN_BILLABLE_HOURS: f64 = 1.0 / 60.0;

/// Elapsed hours between `entry` and `exit`, never less than [`MIN_BILLABLE_HOURS`].
///
/// A negative span (exit before entry) bills the minimum.
pub fn billable_hours(entry: DateTime<Utc>, exit: DateTime<Utc>) -> f64 {
    let seconds = (exit - entry).num_milliseconds() as f64 / 1000.0;
    (seconds / 3600.0).max(MIN_BILLABLE_HOURS)
}

/// Cost of a parking session, rounded to two decimal places.
pub fn parking_cost(entry: DateTime<Utc>, exit: DateTime<Utc>, price_per_hour: f64) -> f64 {
    round_cents(billable_hours(entry, exit) * price_per_hour)
}

/// Round half away from zero to two decimals.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
