//! Logging subsystem built on `tracing-subscriber`.

pub mod manager;
pub mod types;


pub use manager::{InitError, init, try_init};
pub use types::{FileLoggingConfig, LoggerConfig, StdoutConfig};

// Re-export tracing-appender types for convenience
pub use tracing_appender::rolling::Rotation;
