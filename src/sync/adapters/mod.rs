//! Adapter implementations for the content-sync port.

pub mod memory;

pub use memory::InMemoryContentSync;
