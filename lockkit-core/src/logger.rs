//! Host logging bridge.
//!
//! The engine logs through the [`log`] facade. The host app installs a
//! [`Logger`] once at startup and receives every record the engine emits,
//! so lock transitions land in the same place as the rest of the app's
//! logs.
//!
//! ```rust
//! use lockkit_core::logger::{LogLevel, Logger};
//!
//! struct PrintLogger;
//!
//! impl Logger for PrintLogger {
//!     fn log(&self, level: LogLevel, message: String) {
//!         println!("[{level:?}] {message}");
//!     }
//! }
//!
//! lockkit_core::logger::set_logger(std::sync::Arc::new(PrintLogger));
//! ```

use std::sync::{Arc, OnceLock};

/// Log sink implemented by the host app.
#[uniffi::export(with_foreign)]
pub trait Logger: Send + Sync {
    /// Receives one log record.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a forwarded log record.
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum LogLevel {
    /// Very detailed diagnostics.
    Trace,
    /// Debugging information.
    Debug,
    /// Normal progress messages.
    Info,
    /// Something unexpected the engine recovered from.
    Warn,
    /// An error the host should surface.
    Error,
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Forwards `log` records to the installed host sink.
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        // Keep third-party debug/trace chatter away from the host sink.
        let from_lockkit = record
            .module_path()
            .is_some_and(|path| path.starts_with("lockkit"));
        if record.level() >= log::Level::Debug && !from_lockkit {
            return;
        }
        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(level_of(record.level()), format!("{}", record.args()));
        }
    }

    fn flush(&self) {}
}

const fn level_of(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Trace => LogLevel::Trace,
    }
}

/// Installs the host logger. Call once at app startup; later calls are
/// ignored, as is installation after some other `log` backend claimed the
/// process.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        log::warn!("host logger already installed");
        return;
    }
    static FORWARDER: ForeignLogger = ForeignLogger;
    if log::set_logger(&FORWARDER).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}
