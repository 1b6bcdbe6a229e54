//! Unit tests for the task module.


#[path = "../../../tests/test_helpers/mod.rs"]
mod test_helpers;

pub(crate) use test_helpers::ManualClock;

use chrono::{DateTime, TimeZone, Utc};

/// Mid-day reference instant used across task tests.
pub(crate) fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
        .single()
        .expect("valid reference instant")
}
