pub mod priority;

pub use priority::{schedule, schedule_indices, unscheduled};
