//! Task module - the to-do entity and its completion marker.
//!
//! Pure data and pure functions only; persistence lives in `store`.

pub mod task;

pub use task::{Task, COMPLETION_MARKER, MARKER_PREFIX};
