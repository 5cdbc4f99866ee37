/// Galaxy3D Engine - global logging hub
///
/// The scene index itself keeps no global state: every tree is an independent
/// instance. The only process-wide state is the logger, stored behind a
/// `OnceLock<RwLock<..>>` so any thread may log.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Threshold used until `set_log_level` is called
const DEFAULT_LOG_LEVEL: LogSeverity = LogSeverity::Info;

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<LoggerState>> = OnceLock::new();

/// Active logger and its minimum severity
struct LoggerState {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

impl LoggerState {
    fn new() -> Self {
        Self {
            logger: Box::new(DefaultLogger),
            min_severity: DEFAULT_LOG_LEVEL,
        }
    }
}

fn logger_state() -> &'static RwLock<LoggerState> {
    LOGGER.get_or_init(|| RwLock::new(LoggerState::new()))
}

/// Engine logging facade
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_scene_index::galaxy3d::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Engine::set_logger(FileLogger);
/// Engine::set_log_level(LogSeverity::Info);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the active logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut state) = logger_state().write() {
            state.logger = Box::new(logger);
        }
    }

    /// Restore the DefaultLogger and the default threshold
    pub fn reset_logger() {
        if let Ok(mut state) = logger_state().write() {
            *state = LoggerState::new();
        }
    }

    /// Drop every entry below `min_severity`
    pub fn set_log_level(min_severity: LogSeverity) {
        if let Ok(mut state) = logger_state().write() {
            state.min_severity = min_severity;
        }
    }

    /// Current minimum severity
    pub fn log_level() -> LogSeverity {
        logger_state()
            .read()
            .map(|state| state.min_severity)
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Whether an entry of `severity` would reach the logger.
    ///
    /// The `engine_*!` macros check this before formatting their message.
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity >= Self::log_level()
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! (and engine_bail!) to include the call site.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if let Ok(state) = logger_state().read() {
            if severity < state.min_severity {
                return;
            }
            state.logger.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
