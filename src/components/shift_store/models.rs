use crate::components::shift_editor::models::TimeInterval;
use serde::{Deserialize, Serialize};

/// Request and response body of the shift endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDayPayload {
    #[serde(default)]
    pub intervals: Vec<TimeInterval>,
}

impl ShiftDayPayload {
    pub fn new(intervals: Vec<TimeInterval>) -> Self {
        Self { intervals }
    }
}
