use pdfpost_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        tracing::error!("{:#}", err);
        eprintln!("pdfpost error: {:#}", err);
        std::process::exit(1);
    }
}
