//! Stderr logging with three verbosity levels.
//!
//! Library code logs through the `log` facade; [`Logger::install`] routes
//! those records to stderr, filtered by the chosen [`LogLevel`].

use std::env;
use std::fmt;

/// Environment variable selecting the log level when no flag is given.
pub const ENV_LOG_MODE: &str = "RENTBNB_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use rentbnb::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No diagnostic output at all.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything, including planning and execution steps.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses "quiet", "normal" or "verbose", ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use rentbnb::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` crate filter matching this level.
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// A stderr logger.
///
/// # Examples
///
/// ```
/// use rentbnb::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.warn("cabin 004 has no reservations");
/// logger.debug("not printed at Normal");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Makes this logger the `log` backend for the rest of the process.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend was already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let filter = self.level.filter();
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn emit(&self, level: log::Level, message: fmt::Arguments<'_>) {
        if level <= self.level.filter() {
            eprintln!("{}: {message}", level.as_str());
        }
    }

    /// Logs an error message. Suppressed only at Quiet.
    pub fn error(&self, message: &str) {
        self.emit(log::Level::Error, format_args!("{message}"));
    }

    /// Logs a warning message. Suppressed only at Quiet.
    pub fn warn(&self, message: &str) {
        self.emit(log::Level::Warn, format_args!("{message}"));
    }

    /// Logs an informational message. Verbose only.
    pub fn info(&self, message: &str) {
        self.emit(log::Level::Info, format_args!("{message}"));
    }

    /// Logs a debug message. Verbose only.
    pub fn debug(&self, message: &str) {
        self.emit(log::Level::Debug, format_args!("{message}"));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            self.emit(record.level(), *record.args());
        }
    }

    fn flush(&self) {}
}

/// Chooses the log level: `--verbose` beats `--quiet`, either flag beats
/// `RENTBNB_LOG_MODE`, and the default is Normal.
///
/// # Examples
///
/// ```
/// use rentbnb::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    env::var(ENV_LOG_MODE)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .map_or_else(Logger::default, Logger::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_log_mode<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let saved = env::var(ENV_LOG_MODE).ok();
        match value {
            Some(v) => env::set_var(ENV_LOG_MODE, v),
            None => env::remove_var(ENV_LOG_MODE),
        }
        let result = f();
        match saved {
            Some(v) => env::set_var(ENV_LOG_MODE, v),
            None => env::remove_var(ENV_LOG_MODE),
        }
        result
    }

    #[test]
    fn test_log_level_display_and_parse() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            assert_eq!(LogLevel::parse(&level.to_string()).unwrap(), level);
        }
        assert_eq!(LogLevel::parse(" Normal ").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_filters() {
        assert_eq!(LogLevel::Quiet.filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Normal.filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_log_enabled_by_level() {
        use log::Log;

        let normal = Logger::new(LogLevel::Normal);
        let warn = log::Metadata::builder().level(log::Level::Warn).build();
        let info = log::Metadata::builder().level(log::Level::Info).build();
        assert!(normal.enabled(&warn));
        assert!(!normal.enabled(&info));
        assert!(!Logger::new(LogLevel::Quiet).enabled(&warn));
        assert!(Logger::new(LogLevel::Verbose).enabled(&info));
    }

    #[test]
    #[serial]
    fn test_init_logger_default() {
        let logger = with_log_mode(None, || init_logger(false, false));
        assert_eq!(logger.level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_from_env() {
        assert_eq!(
            with_log_mode(Some("verbose"), || init_logger(false, false)).level(),
            LogLevel::Verbose
        );
        assert_eq!(
            with_log_mode(Some("quiet"), || init_logger(false, false)).level(),
            LogLevel::Quiet
        );
        assert_eq!(
            with_log_mode(Some("shouting"), || init_logger(false, false)).level(),
            LogLevel::Normal
        );
    }

    #[test]
    #[serial]
    fn test_flags_override_env() {
        let logger = with_log_mode(Some("quiet"), || init_logger(true, false));
        assert_eq!(logger.level(), LogLevel::Verbose);
        let logger = with_log_mode(Some("verbose"), || init_logger(false, true));
        assert_eq!(logger.level(), LogLevel::Quiet);
    }
}
