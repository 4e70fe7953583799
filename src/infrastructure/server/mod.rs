//! HTTP server lifecycle helpers

mod shutdown;

pub use shutdown::shutdown_signal;
