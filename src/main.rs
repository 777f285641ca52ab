//! Happy day admin console CLI

use std::process;

use clap::Parser;
use happy_day_admin::system::setup_tracing;

mod cli;

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();
    setup_tracing();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
