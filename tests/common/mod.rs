#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shift_editor::components::shift_editor::models::{SubjectDay, TimeInterval};
use shift_editor::components::shift_store::ShiftStore;
use shift_editor::error::{persistence_error, EditorResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn interval(start: (u32, u32), end: (u32, u32)) -> TimeInterval {
    TimeInterval::on(day(), at(start.0, start.1), at(end.0, end.1))
}

/// Mock store that records every save and answers with a fixed canonical
/// list, or echoes the request when none is set
#[derive(Debug, Default)]
pub struct RecordingStore {
    loaded: Vec<TimeInterval>,
    canonical: Option<Vec<TimeInterval>>,
    saves: Mutex<Vec<Vec<TimeInterval>>>,
    failing: AtomicBool,
}

impl RecordingStore {
    pub fn new(loaded: Vec<TimeInterval>) -> Self {
        Self {
            loaded,
            ..Default::default()
        }
    }

    pub fn with_canonical(mut self, canonical: Vec<TimeInterval>) -> Self {
        self.canonical = Some(canonical);
        self
    }

    /// Make the following saves fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn saves(&self) -> Vec<Vec<TimeInterval>> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShiftStore for RecordingStore {
    async fn load_intervals(&self, _subject_day: &SubjectDay) -> EditorResult<Vec<TimeInterval>> {
        Ok(self.loaded.clone())
    }

    async fn save_intervals(
        &self,
        _subject_day: &SubjectDay,
        intervals: &[TimeInterval],
    ) -> EditorResult<Vec<TimeInterval>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(persistence_error("Failed to save shift: HTTP 503"));
        }

        self.saves.lock().unwrap().push(intervals.to_vec());
        Ok(self
            .canonical
            .clone()
            .unwrap_or_else(|| intervals.to_vec()))
    }
}
