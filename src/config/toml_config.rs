use crate::utils::error::{AppError, Result};
use crate::utils::logger::{LogSink, LoggerConfig};
use crate::utils::validation::{validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_CALLER_SKIP: i32 = 64;

/// Optional configuration file.
///
/// ```toml
/// [logger]
/// development = true
/// caller_skip = 2
/// output = "stderr"   # "stdout", "stderr" or a file path
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub logger: LoggerSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggerSection {
    pub development: Option<bool>,
    pub caller_skip: Option<i32>,
    pub output: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| AppError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Builds the logger options, opening the configured sink.
    pub fn to_logger_config(&self) -> Result<LoggerConfig> {
        let output = self
            .logger
            .output
            .as_deref()
            .map(open_sink)
            .transpose()?;

        Ok(LoggerConfig {
            is_development: self.logger.development.unwrap_or(false),
            output,
            caller_skip: self.logger.caller_skip.unwrap_or(0),
        })
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(skip) = self.logger.caller_skip {
            validate_range("logger.caller_skip", skip, 1, MAX_CALLER_SKIP)?;
        }
        if let Some(output) = &self.logger.output {
            validate_path("logger.output", output)?;
        }
        Ok(())
    }
}

fn open_sink(output: &str) -> Result<LogSink> {
    match output.trim() {
        "stdout" => Ok(LogSink::stdout()),
        "stderr" => Ok(LogSink::stderr()),
        path => LogSink::append_file(path),
    }
}
