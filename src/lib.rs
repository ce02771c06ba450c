pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

pub use adapters::MyObjectRepositoryAdapter;
pub use app::MyObjectUseCase;
pub use config::{CliConfig, Command};
pub use domain::{MyObject, MyObjectRepository};
pub use utils::error::{AppError, Result};
pub use utils::logger::{Logger, LoggerConfig};
