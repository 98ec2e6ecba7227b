mod interval_set;
pub mod models;
mod session;

pub use interval_set::{
    is_valid, sort_intervals, total_minutes, validate, EditOutcome, WorkingIntervalSet,
};
pub use models::{ShiftDefaults, ShiftScope, SubjectDay, TimeInterval};
pub use session::EditingSession;
