//! Diagnostics via `tracing`.
//!
//! Filtering follows `RUST_LOG`, e.g. `RUST_LOG=pillpick::tui::keys=trace`.
//! Without it the stderr layer shows `warn` and up and the `--log-file`
//! layer records `debug` and up. Subcommands log to stderr. The interactive
//! picker owns the terminal, so it only logs when `--log-file` is given.

use std::path::Path;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CONSOLE_DEFAULT: &str = "warn";
const FILE_DEFAULT: &str = "debug";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(console: bool, log_file: Option<&Path>) {
    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(env_filter(CONSOLE_DEFAULT))
    });

    let file_layer = log_file.and_then(|path| {
        let file_name = path.file_name()?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let appender = tracing_appender::rolling::never(dir, file_name);
        Some(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(env_filter(FILE_DEFAULT)),
        )
    });

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
