use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Set up tracing once for the whole process: human-readable output on the
/// console plus a daily-rotated JSON log under `logs/`. Pipeline stages
/// emit plain `tracing` events and never touch the subscriber.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "etl.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("employee_etl=info".parse().unwrap()))
        .with(file_layer)
        .with(console_layer)
        .init();

    // The appender guard must outlive the process or buffered log lines
    // are dropped on exit
    std::mem::forget(guard);
}
