use crate::utils::error::AppError;
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Panic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
        }
    }

    /// Name written in the `level` column of every record.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Panic => "PANIC",
        }
    }

    /// tracing has no fatal or panic level; both travel as ERROR and keep
    /// their own label in the record.
    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => tracing::Level::ERROR,
        }
    }

    /// Records at this level and above carry a stack trace.
    pub fn wants_stacktrace(&self) -> bool {
        *self >= LogLevel::Error
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| AppError::InvalidConfigValueError {
                field: "LOG_LEVEL".to_string(),
                value: s.to_string(),
                reason: "expected one of debug, info, warn, error, fatal, panic".to_string(),
            })
    }
}

/// Output encoding selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// Colorized console lines.
    Development,
    /// One JSON object per line.
    #[default]
    Production,
}

impl LogMode {
    pub(crate) fn banner(&self) -> &'static str {
        match self {
            LogMode::Development => "Development mode ENABLED (console output).",
            LogMode::Production => "Production mode ENABLED (JSON output).",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Fatal".parse::<LogLevel>().unwrap(), LogLevel::Fatal);
        assert_eq!("pAnIc".parse::<LogLevel>().unwrap(), LogLevel::Panic);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert!("trace".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
        assert!("warning".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Panic);
        assert!(!LogLevel::Warn.wants_stacktrace());
        assert!(LogLevel::Error.wants_stacktrace());
    }

    #[test]
    fn test_fatal_and_panic_map_to_error() {
        assert_eq!(LogLevel::Fatal.as_tracing(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Panic.as_tracing(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Fatal.label(), "FATAL");
    }
}
