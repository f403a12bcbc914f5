//! Logging initialization

use crate::config::LoggerConfig;
use tracing_subscriber::EnvFilter;

/// Install the global stderr subscriber
///
/// `RUST_LOG` wins when set. Otherwise the configured level applies, raised
/// to `debug` by `debug`, which also adds targets, files and line numbers.
pub fn init_logging(logger: &LoggerConfig, debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if debug { "debug" } else { logger.level.as_str() };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(logger.ansi)
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}
