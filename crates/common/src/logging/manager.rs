//! Logging initialization.

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::{Directive, ParseError},
    fmt::layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use super::types::LoggerConfig;

/// Errors from installing the global subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    /// The default filter directive could not be parsed.
    #[error("invalid log directive: {0}")]
    Directive(#[source] ParseError),

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[source] TryInitError),
}

fn build_filter(config: &LoggerConfig) -> Result<EnvFilter, InitError> {
    let directive: Directive = config
        .default_directive
        .parse()
        .map_err(InitError::Directive)?;
    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}

/// Installs the global subscriber described by `config`.
///
/// Fails if a global subscriber has already been set, so tests sharing a
/// process can call it repeatedly and ignore the error.
pub fn try_init(config: LoggerConfig) -> Result<(), InitError> {
    let filt = build_filter(&config)?;

    // Configure stdout logging with JSON or compact format
    let stdout_config = &config.stdout_config;
    let stdout_sub = match (stdout_config.json_format, stdout_config.test_writer) {
        (true, true) => layer()
            .json()
            .with_test_writer()
            .with_span_events(stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
        (true, false) => layer()
            .json()
            .with_span_events(stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
        (false, true) => layer()
            .compact()
            .with_test_writer()
            .with_span_events(stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
        (false, false) => layer()
            .compact()
            .with_span_events(stdout_config.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed(),
    };

    // Build optional file logging layer
    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()
        .map_err(InitError::AlreadyInitialized)?;

    info!(service_name = %config.service_name, "logging initialized");
    Ok(())
}

/// Installs the global subscriber, logging to stderr if one was already set.
pub fn init(config: LoggerConfig) {
    if let Err(e) = try_init(config) {
        eprintln!("logging: {e}");
    }
}
