mod commands;
mod output;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use lda_lib::{validation, Client};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "lda")]
#[command(about = "Search and export U.S. Senate Lobbying Disclosure filings")]
struct Cli {
    /// API token issued by the Senate Office of Public Records (or LDA_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// API base URL (or LDA_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "60", global = true)]
    timeout: f64,

    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search clients by name
    Clients(commands::entities::EntityArgs),
    /// Search lobbyists by name
    Lobbyists(commands::entities::EntityArgs),
    /// List, bulk-fetch and export filings
    Filings(Box<commands::filings::FilingsArgs>),
}

fn build_client(cli: &Cli) -> Result<Client> {
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("LDA_API_TOKEN").ok())
        .unwrap_or_default();
    if token.trim().is_empty() {
        bail!("an API token is required: pass --token or set LDA_API_TOKEN");
    }
    let timeout = validation::validate_timeout(cli.timeout)?;
    let client = match cli
        .base_url
        .clone()
        .or_else(|| std::env::var("LDA_BASE_URL").ok())
    {
        Some(base_url) => Client::with_base_url(&base_url, &token)?,
        None => Client::new(&token)?,
    };
    Ok(client.with_timeout(timeout))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lda=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let client = build_client(&cli)?;

    match &cli.command {
        Commands::Clients(args) => {
            commands::entities::run(args, lda_lib::EntityKind::Client, &client, &format).await?
        }
        Commands::Lobbyists(args) => {
            commands::entities::run(args, lda_lib::EntityKind::Lobbyist, &client, &format).await?
        }
        Commands::Filings(args) => commands::filings::run(args.as_ref(), &client, &format).await?,
    }

    Ok(())
}
