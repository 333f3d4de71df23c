use clap::Parser;
use relish_cli::cli::Cli;
use relish_cli::logging;
use relish_cli::notifier::{self, Outcome};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    match notifier::run(&cli).await {
        Ok(Outcome::Arrived) => {
            println!("order has arrived");
            if let Some(command) = &cli.command {
                notifier::run_arrival_command(command).await;
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::NotArrived) => {
            println!("order has not arrived");
            ExitCode::FAILURE
        }
        Ok(Outcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
