use super::ShiftStore;
use crate::components::shift_editor::sort_intervals;
use crate::components::shift_editor::models::{SubjectDay, TimeInterval};
use crate::error::EditorResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory implementation of the shift store (for testing and dry runs)
#[derive(Debug, Default)]
pub struct InMemoryShiftStore {
    days: RwLock<HashMap<SubjectDay, Vec<TimeInterval>>>,
}

impl InMemoryShiftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one day already filled in
    pub fn with_day(subject_day: SubjectDay, intervals: Vec<TimeInterval>) -> Self {
        let mut days = HashMap::new();
        days.insert(subject_day, intervals);
        Self {
            days: RwLock::new(days),
        }
    }

    /// Number of subject-days with a shift
    pub async fn day_count(&self) -> usize {
        self.days.read().await.len()
    }
}

#[async_trait]
impl ShiftStore for InMemoryShiftStore {
    async fn load_intervals(&self, subject_day: &SubjectDay) -> EditorResult<Vec<TimeInterval>> {
        let days = self.days.read().await;
        Ok(days.get(subject_day).cloned().unwrap_or_default())
    }

    async fn save_intervals(
        &self,
        subject_day: &SubjectDay,
        intervals: &[TimeInterval],
    ) -> EditorResult<Vec<TimeInterval>> {
        let mut days = self.days.write().await;

        if intervals.is_empty() {
            days.remove(subject_day);
            debug!("Removed shift for {}", subject_day);
            return Ok(Vec::new());
        }

        let mut stored = intervals.to_vec();
        sort_intervals(&mut stored);
        days.insert(subject_day.clone(), stored.clone());
        debug!("Stored {} interval(s) for {}", stored.len(), subject_day);

        Ok(stored)
    }
}
