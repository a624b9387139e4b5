mod cli;

use crate::cli::{Cli, Commands};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url_shortener_client::config::{self, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Validate { urls } = &cli.command {
        return cli::validate_urls(urls);
    }

    let config = config::load_from_env()?;
    init_tracing(&config);
    config.print_summary();

    cli::run(cli, config).await
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
