//! In-process storage used by tests and database-less runs

mod memory;

pub use memory::{InMemoryRepository, UniqueKeys};
