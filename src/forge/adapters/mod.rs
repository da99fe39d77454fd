//! Adapter implementations for the hosting port.

pub mod memory;

pub use memory::{InMemoryForge, PostedComment};
