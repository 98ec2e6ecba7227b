use super::interval_set::{validate, EditOutcome, WorkingIntervalSet};
use super::models::{ShiftDefaults, SubjectDay, TimeInterval};
use crate::components::shift_store::ShiftStore;
use crate::error::{EditorResult, ValidationError};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::{error, info};

/// Editing session for the shift of one subject-day.
///
/// Holds the last list the store confirmed (the baseline) next to the
/// working copy. Edits only touch the working copy; `save` sends it to the
/// store and adopts whatever the store returns as the new baseline.
pub struct EditingSession {
    store: Arc<dyn ShiftStore>,
    subject_day: SubjectDay,
    anchor: NaiveDate,
    defaults: ShiftDefaults,
    baseline: Vec<TimeInterval>,
    working: WorkingIntervalSet,
}

impl EditingSession {
    /// Load the day's intervals from the store and start editing them
    pub async fn open(
        store: Arc<dyn ShiftStore>,
        subject_day: SubjectDay,
        defaults: ShiftDefaults,
        today: NaiveDate,
    ) -> EditorResult<Self> {
        let baseline = store.load_intervals(&subject_day).await?;
        let anchor = subject_day.anchor_date(today);
        info!(
            "Opened shift editor for {} with {} interval(s)",
            subject_day,
            baseline.len()
        );

        let working = WorkingIntervalSet::with_defaults(baseline.clone(), anchor, defaults);

        Ok(Self {
            store,
            subject_day,
            anchor,
            defaults,
            baseline,
            working,
        })
    }

    pub fn subject_day(&self) -> &SubjectDay {
        &self.subject_day
    }

    /// Intervals as they were last confirmed by the store
    pub fn baseline(&self) -> &[TimeInterval] {
        &self.baseline
    }

    /// Intervals as currently edited
    pub fn intervals(&self) -> &[TimeInterval] {
        self.working.intervals()
    }

    pub fn total_minutes(&self) -> i64 {
        self.working.total_minutes()
    }

    /// Whether there are edits the store has not seen
    pub fn is_dirty(&self) -> bool {
        self.working != self.fresh_working_set()
    }

    /// Whether the interval at `index` may be deleted from this session
    pub fn can_delete_interval(&self, index: usize) -> bool {
        index < self.working.len() && self.working.len() > 1
    }

    pub fn add_interval(&mut self) -> TimeInterval {
        self.working.add_interval()
    }

    pub fn set_interval_start(
        &mut self,
        index: usize,
        time: NaiveTime,
    ) -> Result<EditOutcome, ValidationError> {
        self.working.set_interval_start(index, time)
    }

    pub fn set_interval_end(
        &mut self,
        index: usize,
        time: NaiveTime,
    ) -> Result<EditOutcome, ValidationError> {
        self.working.set_interval_end(index, time)
    }

    /// Delete an interval, keeping at least one row in the editor. Use
    /// [`EditingSession::delete_day`] to remove the whole shift.
    pub fn delete_interval(&mut self, index: usize) -> Result<EditOutcome, ValidationError> {
        if index < self.working.len() && self.working.len() == 1 {
            return Err(ValidationError::LastInterval);
        }

        Ok(self.working.delete_interval(index))
    }

    /// Drop all edits made since the last load or save
    pub fn discard(&mut self) {
        self.working = self.fresh_working_set();
    }

    /// Replace the stored intervals of the day with the working copy.
    ///
    /// Returns the list the store confirmed. On failure the working copy is
    /// kept so the save can be retried.
    pub async fn save(&mut self) -> EditorResult<&[TimeInterval]> {
        validate(self.working.intervals())?;
        let intervals = self.working.intervals().to_vec();
        self.submit(intervals).await
    }

    /// Remove the day's shift entirely. Returns the confirmed list, which is
    /// empty unless the store kept something; the working copy is re-seeded.
    pub async fn delete_day(&mut self) -> EditorResult<&[TimeInterval]> {
        self.submit(Vec::new()).await
    }

    async fn submit(&mut self, intervals: Vec<TimeInterval>) -> EditorResult<&[TimeInterval]> {
        match self.store.save_intervals(&self.subject_day, &intervals).await {
            Ok(canonical) => {
                info!(
                    "Saved {} interval(s) for {}",
                    canonical.len(),
                    self.subject_day
                );
                self.baseline = canonical;
                self.working = self.fresh_working_set();
                Ok(&self.baseline)
            }
            Err(e) => {
                error!("Failed to save shift for {}: {}", self.subject_day, e);
                Err(e)
            }
        }
    }

    fn fresh_working_set(&self) -> WorkingIntervalSet {
        WorkingIntervalSet::with_defaults(self.baseline.clone(), self.anchor, self.defaults)
    }
}
