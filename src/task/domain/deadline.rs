//! Timezone-aware task deadlines and the not-in-the-past rule.

use super::TaskDomainError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task deadline stored as a UTC instant.
///
/// Every constructor produces a timezone-aware value. Naive inputs are
/// interpreted in the local timezone and calendar dates map to local
/// start of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    /// Creates a deadline from a timezone-aware instant.
    #[must_use]
    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.with_timezone(&Utc))
    }

    /// Creates a deadline from a local wall-clock time.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedDeadline`] when the wall-clock
    /// time does not exist locally (DST spring-forward gap).
    pub fn from_local_naive(naive: NaiveDateTime) -> Result<Self, TaskDomainError> {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| Self::at(&local))
            .ok_or_else(|| TaskDomainError::MalformedDeadline(naive.to_string()))
    }

    /// Creates a deadline at local start of day for the given date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedDeadline`] when local midnight
    /// does not exist on that date.
    pub fn from_date(date: NaiveDate) -> Result<Self, TaskDomainError> {
        Self::from_local_naive(date.and_time(NaiveTime::MIN))
    }

    /// Parses a deadline from `YYYY-MM-DD` or an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedDeadline`] for any other input.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::from_date(date);
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|instant| Self::at(&instant))
            .map_err(|_| TaskDomainError::MalformedDeadline(value.to_owned()))
    }

    /// Returns the deadline instant in UTC.
    #[must_use]
    pub const fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the calendar date of the deadline in the local timezone.
    #[must_use]
    pub fn local_date(self) -> NaiveDate {
        self.0.with_timezone(&Local).date_naive()
    }

    /// Returns `true` when the deadline instant is strictly before `now`.
    #[must_use]
    pub fn is_before(self, now: DateTime<Utc>) -> bool {
        self.0 < now
    }

    /// Rejects deadlines whose local calendar date is before today.
    ///
    /// Any time of day on today's date is accepted, even one that has
    /// already passed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeadlineInPast`] when the deadline date
    /// precedes the clock's local date.
    pub fn ensure_not_past(self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let today = clock.local().date_naive();
        let deadline = self.local_date();
        if deadline < today {
            return Err(TaskDomainError::DeadlineInPast { deadline, today });
        }
        Ok(())
    }
}

impl From<DateTime<Utc>> for Deadline {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl FromStr for Deadline {
    type Err = TaskDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Deadline instruction carried by a task edit.
///
/// `Keep` is the default so an edit that does not mention the deadline
/// leaves it alone; `Clear` removes it explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeadlineUpdate {
    /// Leave the stored deadline unchanged.
    #[default]
    Keep,
    /// Replace the deadline.
    Set(Deadline),
    /// Remove the deadline.
    Clear,
}

impl DeadlineUpdate {
    /// Returns the replacement value, or `None` when nothing changes.
    ///
    /// `Some(None)` means the deadline is cleared.
    #[must_use]
    pub const fn replacement(self) -> Option<Option<Deadline>> {
        match self {
            Self::Keep => None,
            Self::Set(deadline) => Some(Some(deadline)),
            Self::Clear => Some(None),
        }
    }
}
