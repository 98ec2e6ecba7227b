use crate::utils::time::{format_time, hhmm, next_weekday_date, weekday_slug};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One working period, in local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Create a new interval
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Create an interval on a single date
    pub fn on(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start: date.and_time(start),
            end: date.and_time(end),
        }
    }

    /// Time covered by the interval
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }

    /// Whether the interval starts strictly before it ends
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Copy with the start moved to `time`, keeping the start's date
    pub fn with_start_time(&self, time: NaiveTime) -> Self {
        Self {
            start: self.start.date().and_time(time),
            end: self.end,
        }
    }

    /// Copy with the end moved to `time`, keeping the end's date
    pub fn with_end_time(&self, time: NaiveTime) -> Self {
        Self {
            start: self.start,
            end: self.end.date().and_time(time),
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.date() == self.end.date() {
            write!(
                f,
                "{} {}-{}",
                self.start.format("%Y-%m-%d"),
                format_time(self.start.time()),
                format_time(self.end.time())
            )
        } else {
            write!(
                f,
                "{} - {}",
                self.start.format("%Y-%m-%d %H:%M"),
                self.end.format("%Y-%m-%d %H:%M")
            )
        }
    }
}

/// Which kind of shift a set of intervals describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftScope {
    /// Weekly recurring shift for one weekday
    Regular(Weekday),
    /// Override for one calendar date
    OneOff(NaiveDate),
}

impl ShiftScope {
    /// Calendar date new intervals are anchored to
    pub fn anchor_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            ShiftScope::Regular(weekday) => next_weekday_date(today, *weekday),
            ShiftScope::OneOff(date) => *date,
        }
    }
}

impl fmt::Display for ShiftScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftScope::Regular(weekday) => write!(f, "every {}", weekday_slug(*weekday)),
            ShiftScope::OneOff(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// One employee on one day: the unit a shift is edited and saved for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectDay {
    pub subject_id: String,
    pub scope: ShiftScope,
}

impl SubjectDay {
    /// Weekly shift of an employee
    pub fn regular(subject_id: impl Into<String>, weekday: Weekday) -> Self {
        Self {
            subject_id: subject_id.into(),
            scope: ShiftScope::Regular(weekday),
        }
    }

    /// One-off shift of an employee on a date
    pub fn one_off(subject_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            subject_id: subject_id.into(),
            scope: ShiftScope::OneOff(date),
        }
    }

    pub fn anchor_date(&self, today: NaiveDate) -> NaiveDate {
        self.scope.anchor_date(today)
    }
}

impl fmt::Display for SubjectDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.subject_id, self.scope)
    }
}

/// Shape of the intervals the editor creates on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftDefaults {
    /// Start of the seeded interval
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Length of the seeded interval
    pub length_minutes: i64,
    /// Gap between the last interval and an added one
    pub added_gap_minutes: i64,
    /// Length of an added interval
    pub added_length_minutes: i64,
}

impl Default for ShiftDefaults {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            length_minutes: 8 * 60,
            added_gap_minutes: 60,
            added_length_minutes: 60,
        }
    }
}

impl ShiftDefaults {
    /// Longest length or gap, in minutes, an editor-created interval may use
    pub const MAX_MINUTES: i64 = 24 * 60;

    /// Check the lengths and the gap are within bounds. Lengths must be
    /// positive so a created interval always starts before it ends.
    pub fn check(&self) -> Result<(), String> {
        let lengths = [
            ("length_minutes", self.length_minutes),
            ("added_length_minutes", self.added_length_minutes),
        ];
        for (name, value) in lengths {
            if !(1..=Self::MAX_MINUTES).contains(&value) {
                return Err(format!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    Self::MAX_MINUTES,
                    value
                ));
            }
        }

        if !(0..=Self::MAX_MINUTES).contains(&self.added_gap_minutes) {
            return Err(format!(
                "added_gap_minutes must be between 0 and {}, got {}",
                Self::MAX_MINUTES,
                self.added_gap_minutes
            ));
        }

        Ok(())
    }

    /// The interval an empty day is seeded with
    pub fn seed_interval(&self, anchor: NaiveDate) -> TimeInterval {
        let start = anchor.and_time(self.start);
        TimeInterval::new(start, shift_by(start, span(self.length_minutes, 1)))
    }

    /// The interval appended after `last`
    pub fn interval_after(&self, last: &TimeInterval) -> TimeInterval {
        let start = shift_by(last.end, span(self.added_gap_minutes, 0));
        TimeInterval::new(start, shift_by(start, span(self.added_length_minutes, 1)))
    }
}

// Clamped into [min, MAX_MINUTES] for values that skipped `check`
fn span(minutes: i64, min: i64) -> TimeDelta {
    TimeDelta::try_minutes(minutes.clamp(min, ShiftDefaults::MAX_MINUTES))
        .unwrap_or(TimeDelta::zero())
}

fn shift_by(at: NaiveDateTime, delta: TimeDelta) -> NaiveDateTime {
    at.checked_add_signed(delta).unwrap_or(NaiveDateTime::MAX)
}
