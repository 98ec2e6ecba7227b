use super::models::{ShiftDefaults, TimeInterval};
use crate::error::ValidationError;
use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

/// Result of an edit that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The set was changed
    Applied,
    /// The index did not name an interval; nothing changed
    Ignored,
}

/// The shift intervals of one subject-day while they are being edited.
///
/// After every accepted mutation the intervals are sorted by start, each
/// starts before it ends, and none overlap (touching is allowed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingIntervalSet {
    anchor: NaiveDate,
    defaults: ShiftDefaults,
    intervals: Vec<TimeInterval>,
}

impl WorkingIntervalSet {
    /// Build the editable set from the intervals loaded for a day.
    ///
    /// An empty day gets one default interval so there is always a row to
    /// edit.
    pub fn initialize(existing: Vec<TimeInterval>, anchor: NaiveDate) -> Self {
        Self::with_defaults(existing, anchor, ShiftDefaults::default())
    }

    /// Same as [`WorkingIntervalSet::initialize`] with custom defaults
    pub fn with_defaults(
        existing: Vec<TimeInterval>,
        anchor: NaiveDate,
        defaults: ShiftDefaults,
    ) -> Self {
        let mut intervals = existing;
        if intervals.is_empty() {
            intervals.push(defaults.seed_interval(anchor));
        } else {
            sort_intervals(&mut intervals);
        }

        Self {
            anchor,
            defaults,
            intervals,
        }
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Move the start of the interval at `index` to `time` on the same date
    pub fn set_interval_start(
        &mut self,
        index: usize,
        time: NaiveTime,
    ) -> Result<EditOutcome, ValidationError> {
        self.edit(index, |interval| interval.with_start_time(time))
    }

    /// Move the end of the interval at `index` to `time` on the same date
    pub fn set_interval_end(
        &mut self,
        index: usize,
        time: NaiveTime,
    ) -> Result<EditOutcome, ValidationError> {
        self.edit(index, |interval| interval.with_end_time(time))
    }

    /// Remove the interval at `index`. Removal cannot break validity, so this
    /// is never rejected.
    pub fn delete_interval(&mut self, index: usize) -> EditOutcome {
        if index >= self.intervals.len() {
            debug!("Ignoring delete of missing interval {}", index);
            return EditOutcome::Ignored;
        }

        let removed = self.intervals.remove(index);
        debug!("Deleted interval {}: {}", index, removed);
        EditOutcome::Applied
    }

    /// Append an interval after the last one, or the default interval when
    /// the set is empty. Returns the new interval.
    pub fn add_interval(&mut self) -> TimeInterval {
        let added = match self.intervals.last() {
            Some(last) => self.defaults.interval_after(last),
            None => self.defaults.seed_interval(self.anchor),
        };

        self.intervals.push(added);
        sort_intervals(&mut self.intervals);
        debug!("Added interval {}", added);
        added
    }

    /// Total working time of the current set, in minutes
    pub fn total_minutes(&self) -> i64 {
        total_minutes(&self.intervals)
    }

    fn edit(
        &mut self,
        index: usize,
        change: impl FnOnce(&TimeInterval) -> TimeInterval,
    ) -> Result<EditOutcome, ValidationError> {
        let Some(current) = self.intervals.get(index) else {
            debug!("Ignoring edit of missing interval {}", index);
            return Ok(EditOutcome::Ignored);
        };

        let mut candidate = self.intervals.clone();
        candidate[index] = change(current);

        if let Err(e) = validate(&candidate) {
            debug!("Rejected edit of interval {}: {}", index, e);
            return Err(e);
        }

        sort_intervals(&mut candidate);
        self.intervals = candidate;
        Ok(EditOutcome::Applied)
    }
}

/// Sort intervals by start, then end
pub fn sort_intervals(intervals: &mut [TimeInterval]) {
    intervals.sort_by_key(|interval| (interval.start, interval.end));
}

/// Check a candidate set of intervals.
///
/// Fails when any interval does not start strictly before it ends, or when
/// an interval ends after the next one (in start order) begins. Back-to-back
/// intervals pass.
pub fn validate(candidates: &[TimeInterval]) -> Result<(), ValidationError> {
    let mut sorted = candidates.to_vec();
    sort_intervals(&mut sorted);

    if let Some(interval) = sorted.iter().find(|interval| !interval.is_well_formed()) {
        return Err(ValidationError::StartNotBeforeEnd {
            interval: *interval,
        });
    }

    for pair in sorted.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(ValidationError::Overlap {
                first: pair[0],
                second: pair[1],
            });
        }
    }

    Ok(())
}

/// Boolean form of [`validate`]
pub fn is_valid(candidates: &[TimeInterval]) -> bool {
    validate(candidates).is_ok()
}

/// Exact sum of interval lengths in whole minutes
pub fn total_minutes(intervals: &[TimeInterval]) -> i64 {
    intervals
        .iter()
        .map(TimeInterval::duration)
        .fold(Duration::zero(), |total, length| total + length)
        .num_minutes()
}
