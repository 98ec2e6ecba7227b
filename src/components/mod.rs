// Export components
pub mod shift_editor;
pub mod shift_store;

pub use shift_editor::{EditingSession, WorkingIntervalSet};
pub use shift_store::{HttpShiftStore, InMemoryShiftStore, ShiftStore};
