//! Adapter implementations for correlation ports.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCorrelationStore;
pub use postgres::PostgresCorrelationStore;
