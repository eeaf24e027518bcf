mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tubefix_config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays for the run summary
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tubefix error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: cli::Cli) -> Result<()> {
    match cli.command {
        cli::Commands::Run(args) => commands::run::handle(args, &Config::load()?).await,
        cli::Commands::Auth(cmd) => commands::auth::handle(cmd, &Config::load()?).await,
        cli::Commands::Title { filenames } => {
            commands::title::handle(&filenames);
            Ok(())
        }
        cli::Commands::Config(cmd) => commands::config::handle(cmd, &Config::load()?),
    }
}
