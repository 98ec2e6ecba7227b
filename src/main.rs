use clap::Parser;
use shift_editor::commands::Cli;
use shift_editor::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();
    info!("Starting shift editor");

    startup::run(cli).await
}
