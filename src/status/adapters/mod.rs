//! Adapter implementations for the status reporting port.

pub mod memory;

pub use memory::{InMemoryStatusReporter, RecordedStatus};
