mod http;
mod memory;
pub mod models;

pub use http::HttpShiftStore;
pub use memory::InMemoryShiftStore;

use crate::components::shift_editor::models::{SubjectDay, TimeInterval};
use crate::error::EditorResult;
use async_trait::async_trait;

/// Remote home of the shift intervals.
///
/// Regular and one-off shifts go through the same trait; implementations
/// pick the endpoint from the subject-day's scope.
#[async_trait]
pub trait ShiftStore: Send + Sync + 'static {
    /// Fetch the intervals stored for a subject-day. An empty list means no
    /// shift is defined.
    async fn load_intervals(&self, subject_day: &SubjectDay) -> EditorResult<Vec<TimeInterval>>;

    /// Replace all intervals of a subject-day and return the stored list.
    /// An empty list deletes the day's shift.
    async fn save_intervals(
        &self,
        subject_day: &SubjectDay,
        intervals: &[TimeInterval],
    ) -> EditorResult<Vec<TimeInterval>>;
}
