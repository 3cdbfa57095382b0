use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "price_normalizer=info";

/// Initializes logging to stderr, optionally also to a daily-rotated JSON file.
///
/// stdout is left alone because the CLI prints its results there. The returned
/// guard must be held for the life of the process so file logs get flushed.
pub fn init_logging(json: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let _ = fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, "price_normalizer.log");
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().json().with_writer(non_blocking_writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let json_console = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let plain_console = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    // A second init (tests, embedding callers) keeps the existing subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(json_console)
        .with(plain_console)
        .try_init();

    guard
}
