use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;

use working_date_server::api::{resolve_working_date, AppState};
use working_date_server::cli::{Cli, Command, ComputeArgs, ServeArgs};
use working_date_server::logging::init_logging;
use working_date_server::server::serve;

/// Exit status for a rejected `compute` request.
const EXIT_INVALID: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Compute(args) => run_compute(args).await,
    }
}

async fn run_serve(args: ServeArgs) -> anyhow::Result<ExitCode> {
    info!("working-date v{}", env!("CARGO_PKG_VERSION"));
    let source = args.holidays.source().context("invalid holiday source")?;
    info!(holidays = %source.describe(), "holiday source configured");

    serve(args.addr(), AppState::new(source)).await?;
    Ok(ExitCode::SUCCESS)
}

async fn run_compute(args: ComputeArgs) -> anyhow::Result<ExitCode> {
    let source = args.holidays.source().context("invalid holiday source")?;
    match resolve_working_date(&args.to_query(), source.as_ref(), Utc::now()).await {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&e.body())?);
            Ok(ExitCode::from(EXIT_INVALID))
        }
    }
}
