//! Terminal front-end for the shortening session.
//!
//! Renders the same state a browser front-end would: the last shortened URL
//! and the "Last links" list, and feeds user input to the session controller.
//!
//! # Usage
//!
//! ```bash
//! # Shorten one or more URLs
//! url-shortener-client shorten https://example.com/a/very/long/path
//!
//! # Show recent links
//! url-shortener-client history
//!
//! # Check input locally, no request is made
//! url-shortener-client validate example.com "not a url"
//!
//! # Prompt loop
//! url-shortener-client interactive
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use url_shortener_client::application::services::{
    HistoryStore, SessionController, SubmitOutcome, SubmitPolicy,
};
use url_shortener_client::config::Config;
use url_shortener_client::domain::entities::HistoryItem;
use url_shortener_client::domain::ports::{HistoryStorage, ShortenClient};
use url_shortener_client::infrastructure::http::HttpShortenClient;
use url_shortener_client::infrastructure::storage::{FileStorage, MemoryStorage};
use url_shortener_client::utils::url_validator::is_valid_url;

/// Input that ends the interactive loop.
const QUIT_COMMANDS: &[&str] = &[":q", ":quit", ":exit"];

type Controller = SessionController<dyn ShortenClient, dyn HistoryStorage>;

/// Shorten URLs through a remote service and keep the last few at hand.
#[derive(Parser)]
#[command(name = "url-shortener-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep history in memory only for this run
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Check input with the URL validator before sending it
    #[arg(long, global = true)]
    pub validate: bool,

    /// How overlapping submissions are handled (concurrent, latest-wins, single-flight)
    #[arg(long, global = true)]
    pub policy: Option<SubmitPolicy>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Shorten one or more URLs
    Shorten {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Show recent links
    History,

    /// Check whether inputs look like URLs (no request is made)
    Validate {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Read URLs from a prompt until `:q`
    Interactive,
}

/// Dispatches a parsed command.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let controller = build_controller(&cli, &config);

    match cli.command {
        Commands::Shorten { urls } => shorten(&controller, urls).await,
        Commands::History => {
            print_history(&controller.history());
            Ok(())
        }
        Commands::Interactive => interactive(&controller).await,
        Commands::Validate { urls } => validate_urls(&urls),
    }
}

fn build_controller(cli: &Cli, config: &Config) -> Controller {
    let storage: Arc<dyn HistoryStorage> = if cli.no_persist {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(FileStorage::new(&config.history_dir))
    };
    let client: Arc<dyn ShortenClient> = Arc::new(HttpShortenClient::new(&config.api_url));

    let mut options = config.session_options();
    if cli.validate {
        options.validate_before_submit = true;
    }
    if let Some(policy) = cli.policy {
        options.policy = policy;
    }

    SessionController::new(client, HistoryStore::open(storage), options)
}

/// Submits each URL in turn, then renders the result and history.
///
/// Fails if any submission failed or was rejected.
async fn shorten(controller: &Controller, urls: Vec<String>) -> Result<()> {
    let mut failed = 0;

    for url in urls {
        if !report_outcome(&url, controller.submit_input(url.clone()).await) {
            failed += 1;
        }
    }

    println!();
    print_result(controller.last_shortened().as_deref());
    print_history(&controller.history());

    if failed > 0 {
        anyhow::bail!("{failed} URL(s) could not be shortened");
    }

    Ok(())
}

/// Prompt loop modelled on the web form: empty input does nothing.
async fn interactive(controller: &Controller) -> Result<()> {
    println!("{}", "🔗 Short link".bright_blue().bold());
    println!(
        "  {}",
        format!("Enter a URL to shorten, {} to quit", QUIT_COMMANDS[0]).bright_black()
    );
    println!();
    print_history(&controller.history());

    loop {
        let input: String = Input::new()
            .with_prompt("Link to shortcut")
            .allow_empty(true)
            .interact_text()?;

        if QUIT_COMMANDS.contains(&input.trim()) {
            break;
        }

        controller.set_input(input.clone());
        let outcome = controller.submit().await;
        if matches!(outcome, SubmitOutcome::Ignored) {
            continue;
        }
        report_outcome(&input, outcome);

        println!();
        print_result(controller.last_shortened().as_deref());
        print_history(&controller.history());
    }

    Ok(())
}

/// Prints the validator verdict for each input.
///
/// Fails if any input is invalid.
pub fn validate_urls(urls: &[String]) -> Result<()> {
    let mut invalid = 0;

    for url in urls {
        if is_valid_url(url) {
            println!("  {} {}", "✓".green().bold(), url.cyan());
        } else {
            invalid += 1;
            println!("  {} {}", "✗".red().bold(), url.bright_black());
        }
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} of {} input(s) are not valid URLs", urls.len());
    }

    Ok(())
}

/// Prints one line for a submission. Returns false if it failed or was rejected.
fn report_outcome(input: &str, outcome: SubmitOutcome) -> bool {
    match outcome {
        SubmitOutcome::Shortened(item) => {
            println!(
                "  {} {} → {}",
                "✓".green().bold(),
                item.original.cyan(),
                item.shortened.bright_yellow()
            );
            true
        }
        SubmitOutcome::Ignored => {
            println!("  {}", "Nothing to shorten".yellow());
            true
        }
        SubmitOutcome::Rejected { input } => {
            println!(
                "  {} {} {}",
                "✗".red().bold(),
                input.bright_black(),
                "is not a valid URL".red()
            );
            false
        }
        SubmitOutcome::Busy => {
            println!(
                "  {} {}",
                "⏳".yellow(),
                "Another request is still running".yellow()
            );
            true
        }
        SubmitOutcome::Superseded(item) => {
            println!(
                "  {} {} {}",
                "↷".yellow(),
                item.original.bright_black(),
                "(newer result already shown)".yellow()
            );
            true
        }
        SubmitOutcome::Failed(_) => {
            println!(
                "  {} {} {}",
                "✗".red().bold(),
                input.bright_black(),
                "could not be shortened".red()
            );
            false
        }
    }
}

fn print_result(last_shortened: Option<&str>) {
    if let Some(short_url) = last_shortened {
        println!("  {}", short_url.bright_yellow().bold());
        println!();
    }
}

/// Renders the "Last links" list; nothing when it is empty.
fn print_history(items: &[HistoryItem]) {
    if items.is_empty() {
        return;
    }

    println!("{}", "📋 Last links".bright_blue().bold());
    println!();

    for (index, item) in items.iter().enumerate() {
        println!(
            "  {:<2} {}",
            (index + 1).to_string().bright_black(),
            item.original.cyan()
        );
        println!("     {}", item.shortened.bright_yellow());
    }

    println!();
}
