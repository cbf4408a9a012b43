//! Knope CLI entry point.

use clap::Parser;

use knope::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = knope::cli::run(cli).await {
        knope::cli::handle_error(err, json);
    }
}
