//! Structured logger built once at process start and shared by handle.
//!
//! Settings are resolved in this order:
//! 1. level from `LOG_LEVEL` (`debug`, `info`, `warn`, `error`, `fatal`,
//!    `panic`, any case), falling back to `info`;
//! 2. development mode from [`LoggerConfig::is_development`], else from
//!    `DEV_MODE=true` (any case), else production;
//! 3. sink from [`LoggerConfig::output`], else stdout;
//! 4. caller skip from [`LoggerConfig::caller_skip`] when positive, else 1.
//!
//! A [`Logger::disabled`] handle accepts every call and writes nothing. Fatal
//! and panic calls still terminate on a disabled handle.

mod caller;
mod format;
mod level;
mod sink;

pub use format::{ConsoleFormat, JsonFormat};
pub use level::{LogLevel, LogMode};
pub use sink::LogSink;

use crate::utils::error::{AppError, Result};
use std::backtrace::Backtrace;
use std::fmt::{self, Display};
use std::panic::Location;
use std::sync::Arc;
use tracing::Dispatch;
use tracing_subscriber::filter::{filter_fn, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const DEV_MODE_ENV: &str = "DEV_MODE";

/// Construction-time options. Unset fields fall back to the environment or
/// to defaults, see the module docs.
#[derive(Debug, Clone, Default)]
pub struct LoggerConfig {
    pub is_development: bool,
    pub output: Option<LogSink>,
    pub caller_skip: i32,
}

/// Settings after resolving [`LoggerConfig`] against the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub mode: LogMode,
    pub caller_skip: usize,
    /// `LOG_LEVEL` was absent or unrecognized.
    pub level_defaulted: bool,
}

impl LoggerConfig {
    pub fn resolve<F>(&self, env: F) -> LoggerSettings
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = env(LOG_LEVEL_ENV).and_then(|raw| raw.parse::<LogLevel>().ok());
        let level_defaulted = parsed.is_none();

        let development = self.is_development
            || env(DEV_MODE_ENV)
                .map(|raw| raw.eq_ignore_ascii_case("true"))
                .unwrap_or(false);

        LoggerSettings {
            level: parsed.unwrap_or_default(),
            mode: if development {
                LogMode::Development
            } else {
                LogMode::Production
            },
            caller_skip: usize::try_from(self.caller_skip)
                .ok()
                .filter(|skip| *skip > 0)
                .unwrap_or(1),
            level_defaulted,
        }
    }
}

#[derive(Debug)]
struct LoggerInner {
    dispatch: Dispatch,
    sink: LogSink,
    settings: LoggerSettings,
}

/// Cheap to clone; every clone writes to the same sink.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    inner: Option<Arc<LoggerInner>>,
}

impl Logger {
    /// Builds a logger from `config` and the process environment.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::with_env(config, |key| std::env::var(key).ok())
    }

    /// Builds a logger resolving environment variables through `env`.
    pub fn with_env<F>(config: LoggerConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = config.resolve(env);
        if settings.level_defaulted {
            println!("Invalid log level, using 'info' as default.");
        }

        let sink = config.output.unwrap_or_else(LogSink::stdout);
        let dispatch = build_dispatch(&settings, sink.clone());

        let logger = Self {
            inner: Some(Arc::new(LoggerInner {
                dispatch,
                sink,
                settings,
            })),
        };

        logger.info("Logger successfully initialized.");
        logger.debug_fmt(format_args!(
            "{} Log level: {}",
            settings.mode.banner(),
            settings.level
        ));

        Ok(logger)
    }

    /// A handle with no backing logger.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn settings(&self) -> Option<LoggerSettings> {
        self.inner.as_ref().map(|inner| inner.settings)
    }

    pub fn level(&self) -> Option<LogLevel> {
        self.settings().map(|s| s.level)
    }

    pub fn mode(&self) -> Option<LogMode> {
        self.settings().map(|s| s.mode)
    }

    pub fn caller_skip(&self) -> Option<usize> {
        self.settings().map(|s| s.caller_skip)
    }

    /// The tracing dispatcher records are written through.
    pub fn dispatch(&self) -> Option<&Dispatch> {
        self.inner.as_ref().map(|inner| &inner.dispatch)
    }

    /// Routes plain `tracing` macros through this logger for the rest of the
    /// process. Does nothing on a disabled handle.
    pub fn install_global(&self) -> Result<()> {
        let Some(dispatch) = self.dispatch() else {
            return Ok(());
        };
        tracing::dispatcher::set_global_default(dispatch.clone()).map_err(|e| {
            AppError::LoggerInitError {
                message: e.to_string(),
            }
        })
    }

    /// Flushes buffered records to the sink.
    pub fn sync(&self) -> Result<()> {
        match &self.inner {
            Some(inner) => inner.sink.flush().map_err(AppError::from),
            None => Ok(()),
        }
    }

    /// Returns a guard that flushes this logger when dropped.
    pub fn sync_guard(&self) -> SyncGuard {
        SyncGuard {
            logger: self.clone(),
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.log(LogLevel::Debug, &message);
    }

    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, &args);
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.log(LogLevel::Info, &message);
    }

    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, &args);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Display) {
        self.log(LogLevel::Warn, &message);
    }

    #[track_caller]
    pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, &args);
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.log(LogLevel::Error, &message);
    }

    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, &args);
    }

    /// Logs, flushes and exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, message: impl Display) -> ! {
        self.log(LogLevel::Fatal, &message);
        self.exit()
    }

    #[track_caller]
    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(LogLevel::Fatal, &args);
        self.exit()
    }

    /// Logs, flushes and panics with the message.
    #[track_caller]
    pub fn panic(&self, message: impl Display) -> ! {
        self.log(LogLevel::Panic, &message);
        let _ = self.sync();
        panic!("{}", message)
    }

    #[track_caller]
    pub fn panic_fmt(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(LogLevel::Panic, &args);
        let _ = self.sync();
        panic!("{}", args)
    }

    fn exit(&self) -> ! {
        let _ = self.sync();
        std::process::exit(1)
    }

    #[track_caller]
    fn log(&self, level: LogLevel, message: &dyn Display) {
        let Some(inner) = self.inner.as_deref() else {
            return;
        };
        if level < inner.settings.level {
            return;
        }

        let caller = caller::resolve(Location::caller(), inner.settings.caller_skip);
        let severity = level.label();
        let stacktrace = level
            .wants_stacktrace()
            .then(|| Backtrace::force_capture().to_string());
        let stacktrace = stacktrace.as_deref();

        tracing::dispatcher::with_default(&inner.dispatch, || match level {
            LogLevel::Debug => {
                tracing::debug!(severity, caller = %caller, stacktrace, "{}", message)
            }
            LogLevel::Info => {
                tracing::info!(severity, caller = %caller, stacktrace, "{}", message)
            }
            LogLevel::Warn => {
                tracing::warn!(severity, caller = %caller, stacktrace, "{}", message)
            }
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => {
                tracing::error!(severity, caller = %caller, stacktrace, "{}", message)
            }
        });
    }
}

/// Flushes its logger on drop.
#[must_use = "the logger is flushed when the guard is dropped"]
pub struct SyncGuard {
    logger: Logger,
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        let _ = self.logger.sync();
    }
}

fn build_dispatch(settings: &LoggerSettings, sink: LogSink) -> Dispatch {
    let filter = LevelFilter::from_level(settings.level.as_tracing());
    // above error only logger records, which carry `severity`, may pass
    let logger_only = settings.level > LogLevel::Error;
    let threshold = filter_fn(move |metadata| {
        !logger_only || metadata.fields().field("severity").is_some()
    });

    match settings.mode {
        LogMode::Development => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(threshold).with(
                tracing_subscriber::fmt::layer()
                    .event_format(ConsoleFormat)
                    .with_ansi(true)
                    .with_writer(sink),
            ),
        ),
        LogMode::Production => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(threshold).with(
                tracing_subscriber::fmt::layer()
                    .event_format(JsonFormat)
                    .with_ansi(false)
                    .with_writer(sink),
            ),
        ),
    }
}

/// Logs a formatted message at debug level: `log_debug!(logger, "x = {}", x)`.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error_fmt(::std::format_args!($($arg)+))
    };
}

/// Logs at fatal level and exits with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_fmt(::std::format_args!($($arg)+))
    };
}

/// Logs at panic level and panics.
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic_fmt(::std::format_args!($($arg)+))
    };
}
