//! Binary entrypoint for the `cadence` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    cadence::logging::init();

    match cadence::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
