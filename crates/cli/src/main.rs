use clap::Parser;
use stac_validator_cli::StacValidator;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = StacValidator::parse();
    match args.run(true).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}
