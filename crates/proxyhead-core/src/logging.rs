//! Diagnostics for a fetch: tracing events go to a log file in the XDG
//! state dir, or to stderr when that file cannot be opened.
//!
//! stdout carries the fetched header bytes and nothing else.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset: fetch steps at debug, dependencies at info.
const DEFAULT_FILTER: &str = "info,proxyhead_core=debug,proxyhead=debug";

/// Destination of one log event: `proxyhead.log`, or stderr if the log
/// handle could not be duplicated for this event.
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

/// Hands each event a duplicate of the append-mode log file handle.
struct LogFile(fs::File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/proxyhead/proxyhead.log`. The `proxyhead` prefix is
/// added by `xdg` itself.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("proxyhead")?;
    Ok(xdg_dirs.get_state_home().join("proxyhead.log"))
}

/// Send logs to [`log_file_path`], appending across runs.
/// Errors (unwritable state dir, subscriber already set) are returned so the
/// caller can switch to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let log_file_path = log_file_path()?;
    if let Some(dir) = log_file_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    tracing::debug!("proxyhead logging to {}", log_file_path.display());

    Ok(())
}

/// Send logs to stderr. A subscriber that is already installed is kept.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_sits_directly_in_prefixed_state_dir() {
        let state_home = xdg::BaseDirectories::new().unwrap().get_state_home();
        let path = log_file_path().unwrap();
        assert_eq!(path, state_home.join("proxyhead").join("proxyhead.log"));
    }

    #[test]
    fn default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }
}
