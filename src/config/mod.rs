pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::logger::LoggerConfig;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toml_config::FileConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "boilerplate")]
#[command(about = "Layered application scaffold with a structured logger")]
pub struct CliConfig {
    /// Force development (console) log output
    #[arg(long)]
    pub dev: bool,

    /// Override the caller skip used for call-site attribution
    #[arg(long, allow_negative_numbers = true)]
    pub caller_skip: Option<i32>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print every object as a JSON array
    List,
    /// Print one object as JSON
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

impl CliConfig {
    /// Merges the configuration file (if any) with command-line overrides.
    pub fn logger_config(&self) -> Result<LoggerConfig> {
        let file = match &self.config {
            Some(path) => {
                let file = FileConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => FileConfig::default(),
        };

        let mut config = file.to_logger_config()?;
        if self.dev {
            config.is_development = true;
        }
        if let Some(skip) = self.caller_skip {
            config.caller_skip = skip;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_subcommands() {
        let cli = CliConfig::try_parse_from(["boilerplate", "list"]).unwrap();
        assert_eq!(cli.command, Some(Command::List));

        let cli = CliConfig::try_parse_from(["boilerplate", "get", "-12"]).unwrap();
        assert_eq!(cli.command, Some(Command::Get { id: -12 }));

        let cli = CliConfig::try_parse_from(["boilerplate"]).unwrap();
        assert_eq!(cli.command, None);

        assert!(CliConfig::try_parse_from(["boilerplate", "get", "abc"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logger]\ndevelopment = false\ncaller_skip = 2").unwrap();

        let cli = CliConfig::try_parse_from([
            "boilerplate".to_string(),
            "--dev".to_string(),
            "--caller-skip".to_string(),
            "5".to_string(),
            "--config".to_string(),
            file.path().display().to_string(),
            "list".to_string(),
        ])
        .unwrap();

        let config = cli.logger_config().unwrap();
        assert!(config.is_development);
        assert_eq!(config.caller_skip, 5);
    }

    #[test]
    fn test_file_values_without_flags() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logger]\ndevelopment = true\ncaller_skip = 2").unwrap();

        let cli = CliConfig::try_parse_from([
            "boilerplate".to_string(),
            "-c".to_string(),
            file.path().display().to_string(),
        ])
        .unwrap();

        let config = cli.logger_config().unwrap();
        assert!(config.is_development);
        assert_eq!(config.caller_skip, 2);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logger]\ncaller_skip = 100").unwrap();

        let cli = CliConfig::try_parse_from([
            "boilerplate".to_string(),
            "--config".to_string(),
            file.path().display().to_string(),
        ])
        .unwrap();

        assert!(cli.logger_config().is_err());
    }
}
