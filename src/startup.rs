use crate::commands::{self, Cli};
use crate::components::shift_store::{HttpShiftStore, ShiftStore};
use crate::config::Config;
use crate::error::Error;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Run one editor command and print its result
pub async fn run(cli: Cli) -> miette::Result<()> {
    if !cli.command.needs_store() {
        println!("{}", commands::render_time_options());
        return Ok(());
    }

    let config = load_config()?;

    rust_i18n::set_locale(&config.locale);
    info!("Setting locale to {}", config.locale);

    let store: Arc<dyn ShiftStore> = Arc::new(HttpShiftStore::from_config(&config)?);
    let today = config.today()?;

    match commands::execute(cli.command, store, config.shift_defaults, today).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            // Localised message for the person editing
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
