use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV_VAR: &str = "SWIPEDECK_LOG";

/// Resolve the log file path from `SWIPEDECK_LOG`, ignoring blank values
pub fn log_path_from_env() -> Option<PathBuf> {
    std::env::var_os(LOG_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Initialize file logging.
///
/// Stdout belongs to the TUI, so nothing is logged unless `SWIPEDECK_LOG`
/// names a file. The level filter comes from `RUST_LOG` and defaults to
/// `info`.
pub fn init_tracing() {
    let Some(path) = log_path_from_env() else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to open log file {}: {err}", path.display());
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
