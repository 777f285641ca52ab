use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use happy_day_admin::config::{ClientConfig, ErrorPolicy, DEFAULT_API_URL};
use happy_day_admin::domain::DEFAULT_PAGE_SIZE;
use happy_day_admin::system::AdminSystem;

mod entity;
mod list;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "happy-day", about = "Happy day admin console", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Base URL of the happy day API
    #[arg(long, global = true, env = "HAPPY_DAY_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Rows per list page
    #[arg(long, global = true, env = "HAPPY_DAY_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Quiet period in milliseconds before a filter or sort change fetches
    #[arg(long, global = true, env = "HAPPY_DAY_DEBOUNCE_MS", default_value_t = 1000)]
    debounce_ms: u64,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "HAPPY_DAY_TIMEOUT_MS", default_value_t = 30_000)]
    timeout_ms: u64,

    /// What a failed list fetch does: `surface` or `swallow`
    #[arg(long, global = true, env = "HAPPY_DAY_ERROR_POLICY", default_value_t = ErrorPolicy::Surface)]
    error_policy: ErrorPolicy,
}

impl ConfigArgs {
    fn into_config(self) -> Result<ClientConfig, String> {
        Ok(ClientConfig::default()
            .with_api_url(self.api_url)
            .with_page_size(self.page_size)
            .map_err(|error| format!("invalid configuration: {error}"))?
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_request_timeout(Duration::from_millis(self.timeout_ms))
            .with_error_policy(self.error_policy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ResourceKind {
    Customers,
    Products,
    Discounts,
    Orders,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print one page of a collection as JSON lines
    List(list::ListArgs),
    /// Print one entity as JSON
    Show(entity::EntityArgs),
    /// Delete one entity
    Delete(entity::EntityArgs),
    /// Price a set of product lines
    Quote(quote::QuoteArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let config = self.config.into_config()?;
        let system = AdminSystem::connect(&config)
            .map_err(|error| format!("failed to start admin console: {error}"))?;

        let result = match self.command {
            Commands::List(args) => list::run(&system, args).await,
            Commands::Show(args) => entity::show(&system, args).await,
            Commands::Delete(args) => entity::delete(&system, args).await,
            Commands::Quote(args) => quote::run(&system, args).await,
        };

        system
            .shutdown()
            .await
            .map_err(|error| format!("failed to shut down admin console: {error}"))?;
        result
    }
}
