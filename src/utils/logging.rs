use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::settings::{AppConfig, LogFormat, LoggingConfig};

/// `--log-level` values accepted by `azcred`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging settings from config, with the command line level taking precedence.
pub fn resolve(config: &AppConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let configured = config.logging.clone().unwrap_or_default();
    match arg_log_level {
        Some(level) => LoggingConfig::new(level.as_directive().to_owned(), configured.format),
        None => configured,
    }
}

pub fn run(config: &AppConfig, arg_log_level: Option<LogLevel>) {
    init_logging(&resolve(config, arg_log_level));
}

/// Installs the global subscriber. Events go to stderr; stdout carries the
/// token report. A second call is a no-op.
pub fn init_logging(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);

    let format_layer = match cfg.format {
        LogFormat::Json => stderr_layer
            .json()
            .flatten_event(true)
            .with_ansi(false)
            .boxed(),
        LogFormat::Compact => stderr_layer
            .compact()
            .with_target(false)
            .with_ansi(std::io::stderr().is_terminal())
            .boxed(),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(format_layer)
        .try_init();
}
