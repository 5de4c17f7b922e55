//! Configuration types for the logging subsystem.

use std::path::PathBuf;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::format::FmtSpan;

/// Configuration for the stdout logging layer
#[derive(Debug, Clone)]
pub struct StdoutConfig {
    /// Use JSON format instead of compact format
    pub json_format: bool,
    /// Span events to log (ENTER, EXIT, CLOSE, etc.)
    pub fmt_span: FmtSpan,
    /// Route output through the libtest capture instead of raw stdout
    pub test_writer: bool,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            json_format: false,
            fmt_span: FmtSpan::NONE,
            test_writer: false,
        }
    }
}

/// Configuration for file-based logging with rotation
#[derive(Debug, Clone)]
pub struct FileLoggingConfig {
    /// Directory where log files will be written
    pub directory: PathBuf,
    /// Base filename prefix (e.g., "zendoo" -> "zendoo.2026-01-01")
    pub file_name_prefix: String,
    /// Rotation strategy
    pub rotation: Rotation,
    /// Use JSON format for file logs (default: false, uses compact)
    pub json_format: bool,
}

impl FileLoggingConfig {
    pub fn new(directory: PathBuf, file_name_prefix: String) -> Self {
        Self {
            directory,
            file_name_prefix,
            rotation: Rotation::DAILY,
            json_format: false,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_json_format(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }
}

/// Main logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Name reported in the startup event
    pub service_name: String,
    /// Default filter directive used when `RUST_LOG` is not set
    pub default_directive: String,
    /// Stdout logging configuration
    pub stdout_config: StdoutConfig,
    /// File logging configuration (optional)
    pub file_logging_config: Option<FileLoggingConfig>,
}

impl LoggerConfig {
    /// Creates a new config with the given service name, INFO level and compact stdout.
    pub fn with_base_name(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_owned(),
            default_directive: "info".to_owned(),
            stdout_config: StdoutConfig::default(),
            file_logging_config: None,
        }
    }

    /// Config suited for test binaries: debug level, captured by libtest.
    pub fn for_tests(service_name: &str) -> Self {
        let mut config = Self::with_base_name(service_name);
        config.default_directive = "debug".to_owned();
        config.stdout_config.test_writer = true;
        config
    }

    pub fn with_file_logging(mut self, file_config: FileLoggingConfig) -> Self {
        self.file_logging_config = Some(file_config);
        self
    }

    pub fn with_json_stdout(mut self, json_format: bool) -> Self {
        self.stdout_config.json_format = json_format;
        self
    }
}
