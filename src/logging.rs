//! Tracing setup for the articles server.
//!
//! Request traces and store events go to stdout. A second, uncoloured copy is appended to
//! `ARTICLES_LOG_FILE` when that variable (or `.env` entry) names a file.
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber.
///
/// `RUST_LOG` selects the level (`info` when unset). Only stdout is written unless
/// `log_file` is `Some` and the file opens; an unopenable path is reported on stderr and
/// logging continues on stdout alone.
pub fn init_tracing(log_file: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    if let Some(writer) = log_file.and_then(open_log_file) {
        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact();

        registry.with(file_layer).init();
    } else {
        registry.init();
    }
}

fn open_log_file(path: &str) -> Option<NonBlocking> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| eprintln!("Failed to open log file {path}: {err}"))
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let _ = LOG_GUARD.set(guard);
    Some(writer)
}

#[cfg(test)]
mod tests {
    use super::open_log_file;

    #[test]
    fn log_file_is_created_when_path_is_writable() {
        let path = std::env::temp_dir().join(format!("articles-api-{}.log", std::process::id()));
        let path_str = path.to_str().expect("utf8 temp path");

        assert!(open_log_file(path_str).is_some());
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unopenable_log_path_falls_back_to_stdout_only() {
        let path = std::env::temp_dir()
            .join("articles-api-missing-dir")
            .join("nested")
            .join("server.log");
        assert!(open_log_file(path.to_str().expect("utf8 temp path")).is_none());
    }
}
