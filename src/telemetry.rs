//! Diagnostic log setup.
//!
//! Every diagnostic is a line of the form `<timestamp> - <LEVEL> - <message>`.
//! Library code only emits `tracing` events; the binary (or an embedding
//! application) decides where they go by calling [`init_logging`].

use crate::error::{InventoryError, Result};
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Default diagnostic log file.
pub const DEFAULT_LOG_PATH: &str = "inventory_log.txt";

/// Where diagnostics are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogDestination {
    /// Append to a file, creating it if needed.
    File(PathBuf),

    /// Write to standard error.
    Stderr,
}

/// Diagnostic log configuration.
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Sink for log lines.
    pub destination: LogDestination,

    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`).
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File(PathBuf::from(DEFAULT_LOG_PATH)),
            filter: "info".to_string(),
        }
    }
}

/// Event formatter producing `<timestamp> - <LEVEL> - <message>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        write!(writer, "{} - {} - ", now, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build a subscriber writing formatted lines to `make_writer`, without
/// installing it.
pub fn build_subscriber<W>(filter: EnvFilter, make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .event_format(LogLineFormat)
        .with_writer(make_writer)
        .finish()
}

/// Install the process-wide diagnostic subscriber.
///
/// `RUST_LOG` takes precedence over `config.filter`. Fails if the log file
/// cannot be opened or a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| InventoryError::Telemetry(format!("bad log filter: {}", e)))?,
    };

    let installed = match &config.destination {
        LogDestination::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing::subscriber::set_global_default(build_subscriber(filter, Mutex::new(file)))
        }
        LogDestination::Stderr => {
            tracing::subscriber::set_global_default(build_subscriber(filter, io::stderr))
        }
    };

    installed.map_err(|e| InventoryError::Telemetry(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(filter: &str, f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let sink = buffer.clone();
        let subscriber = build_subscriber(EnvFilter::new(filter), move || sink.clone());
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_line_format() {
        let output = capture("info", || {
            tracing::info!("Saved inventory data to file.");
            tracing::warn!("Attempted to remove non-existent item: orange");
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - INFO - Saved inventory data to file."));
        assert!(lines[1].ends_with(" - WARN - Attempted to remove non-existent item: orange"));

        // YYYY-MM-DD HH:MM:SS,mmm
        let stamp = lines[0].split(" - ").next().unwrap();
        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[19..20], ",");
    }

    #[test]
    fn test_filter_drops_lower_levels() {
        let output = capture("error", || {
            tracing::info!("hidden");
            tracing::error!("shown");
        });

        assert!(!output.contains("hidden"));
        assert!(output.contains(" - ERROR - shown"));
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(
            config.destination,
            LogDestination::File(PathBuf::from(DEFAULT_LOG_PATH))
        );
        assert_eq!(config.filter, "info");
    }
}
