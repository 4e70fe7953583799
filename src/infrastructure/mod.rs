//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod provider;
pub mod server;
pub mod storage;

pub use database::{init_database, DatabaseConfig};
pub use provider::RepositoryProvider;
pub use server::shutdown_signal;
pub use storage::InMemoryRepository;
