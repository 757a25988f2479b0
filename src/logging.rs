use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming an optional log file.
pub const LOG_FILE_ENV: &str = "STOCKMANAGER_LOG";

/// Initialize tracing.
///
/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`) so that
/// command output on stdout stays clean. When `STOCKMANAGER_LOG` is set, a
/// second layer writes everything at `info` and above to
/// `{path}.{timestamp}.{pid}`.
pub fn init_tracing() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(env_filter("warn"));

    let file_layer = log_file().map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_filter(env_filter("info"))
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn log_file() -> Option<std::fs::File> {
    let log_path = std::env::var(LOG_FILE_ENV).ok()?;

    // One file per run so concurrent invocations don't interleave
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

    match std::fs::File::create(&unique_path) {
        Ok(file) => Some(file),
        Err(_) => {
            eprintln!("Warning: Failed to create log file: {}", unique_path);
            None
        }
    }
}
