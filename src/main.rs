use boilerplate::{
    log_error, log_info, CliConfig, Command, Logger, MyObjectRepositoryAdapter, MyObjectUseCase,
    Result,
};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = CliConfig::parse();

    let logger = match cli.logger_config().and_then(Logger::new) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("❌ Failed to initialize logger: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _flush = logger.sync_guard();

    if let Err(e) = logger.install_global() {
        logger.warn(format!("tracing macros will not be captured: {}", e));
    }

    let repository = Arc::new(MyObjectRepositoryAdapter::new());
    let use_case = MyObjectUseCase::new(repository);

    match run(cli.command.as_ref(), &use_case, &logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!(logger, "❌ Command failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<&Command>, use_case: &MyObjectUseCase, logger: &Logger) -> Result<()> {
    match command {
        Some(Command::List) => {
            let objects = use_case.get_all_objects()?;
            tracing::debug!(count = objects.len(), "Retrieved objects");
            println!("{}", serde_json::to_string_pretty(&objects)?);
        }
        Some(Command::Get { id }) => {
            let object = use_case.get_object_by_id(*id)?;
            tracing::debug!(id, "Retrieved object");
            println!("{}", serde_json::to_string_pretty(&object)?);
        }
        None => {
            log_info!(logger, "No command given, run `{} --help` for usage", env!("CARGO_PKG_NAME"));
        }
    }
    Ok(())
}
