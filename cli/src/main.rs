//! mqw-provision - code-review account and SSH setup for message-queue workers

use std::process::ExitCode;

use clap::Parser;

use mqw_provision::cli::{Cli, init_tracing};
use mqw_provision::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let as_json = cli.json;
    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if as_json {
                match json::format_error(&format!("{e:#}"), json::error_code(&e)) {
                    Ok(obj) => println!("{obj}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
