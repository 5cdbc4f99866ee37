//! Internal logging system for the Galaxy3D scene index
//!
//! Log entries flow through a single global hub (`Engine`) to a pluggable
//! `Logger`. The default logger prints colored lines to stdout; ERROR entries
//! carry the file:line of the call site.

use colored::*;
use std::fmt;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route scene index logs elsewhere (file, editor console, ...).
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_scene_index::galaxy3d::log::{Logger, LogEntry};
///
/// struct EditorConsoleLogger;
///
/// impl Logger for EditorConsoleLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}: {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "galaxy3d::DynamicTree")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-operation detail (rotations, sibling choices)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Potential issues
    Warn,

    /// Contract violations, reported with file:line
    Error,
}

/// Default logger: colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry as a single plain-text line (no colors)
    pub fn format_plain(entry: &LogEntry) -> String {
        render(entry, severity_label(entry.severity), &entry.source)
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let label = severity_label(entry.severity);
        let label = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };
        println!("{}", render(entry, label, entry.source.bright_blue()));
    }
}

/// Fixed-width severity tag
fn severity_label(severity: LogSeverity) -> &'static str {
    match severity {
        LogSeverity::Trace => "TRACE",
        LogSeverity::Debug => "DEBUG",
        LogSeverity::Info => "INFO ",
        LogSeverity::Warn => "WARN ",
        LogSeverity::Error => "ERROR",
    }
}

/// `[timestamp] [SEVERITY] [source] message`, plus ` (file:line)` when both are known
fn render(entry: &LogEntry, severity: impl fmt::Display, source: impl fmt::Display) -> String {
    let datetime: DateTime<Local> = entry.timestamp.into();
    let mut line = format!(
        "[{}] [{}] [{}] {}",
        datetime.format("%Y-%m-%d %H:%M:%S%.3f"),
        severity,
        source,
        entry.message
    );
    if let (Some(file), Some(line_no)) = (entry.file, entry.line) {
        line.push_str(&format!(" ({}:{})", file, line_no));
    }
    line
}

// ===== LOGGING MACROS =====
//
// Every macro checks `Engine::is_enabled` first: a filtered-out message is
// never formatted.

#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::Engine::is_enabled($crate::galaxy3d::log::LogSeverity::$severity) {
            $crate::galaxy3d::Engine::log(
                $crate::galaxy3d::log::LogSeverity::$severity,
                $source,
                format!($($arg)*),
            );
        }
    };
}

/// Log a TRACE message (off by default)
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::__engine_log!(Trace, $source, $($arg)*)
    };
}

/// Log a DEBUG message (off by default)
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::__engine_log!(Debug, $source, $($arg)*)
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::__engine_log!(Info, $source, $($arg)*)
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::__engine_log!(Warn, $source, $($arg)*)
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::Engine::is_enabled($crate::galaxy3d::log::LogSeverity::Error) {
            $crate::galaxy3d::Engine::log_detailed(
                $crate::galaxy3d::log::LogSeverity::Error,
                $source,
                format!($($arg)*),
                file!(),
                line!(),
            );
        }
    };
}

/// Log an `Error` value at ERROR severity and evaluate to it
///
/// ```ignore
/// let err = engine_err!("galaxy3d::DynamicTree", Error::KeyNotFound(key));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $err:expr) => {{
        let err = $err;
        $crate::engine_error!($source, "{}", err);
        err
    }};
}

/// Log an `Error` value at ERROR severity and return it as `Err`
///
/// ```ignore
/// engine_bail!("galaxy3d::DynamicTree", Error::DuplicateKey(key));
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $err:expr) => {
        return Err($crate::engine_err!($source, $err))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
