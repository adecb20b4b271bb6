//! Binary entrypoint for the `tkn` CLI.

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    // Usage errors exit from here with clap's own code and message.
    let cli = tkn::cli::Cli::parse();
    match tkn::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
