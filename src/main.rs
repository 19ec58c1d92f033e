// Ledger model tools - CLI

use block_models::{Cli, CliHandler};
use clap::Parser;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let handler = CliHandler::new();

    match handler.handle(cli) {
        Ok(outcome) => {
            for line in &outcome.lines {
                println!("{}", line);
            }
            if !outcome.success {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
