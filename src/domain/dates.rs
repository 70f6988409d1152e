//! Calendar-day helpers.
//!
//! The whole system reasons in local calendar days. Dates are `NaiveDate`
//! in memory and `YYYY-MM-DD` strings on the wire (chrono's default serde
//! representation).

use chrono::{Duration, Local, NaiveDate};

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day arithmetic with month/year rollover; `delta` may be negative
pub fn add_days(date: NaiveDate, delta: i64) -> NaiveDate {
    date + Duration::days(delta)
}
