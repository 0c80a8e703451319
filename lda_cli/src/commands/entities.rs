//! The `clients` and `lobbyists` subcommands: first page of a name search.

use anyhow::Result;
use clap::Args;
use lda_lib::{validation, Client, EntityKind, EntityQuery, Query};

use crate::output::{print_clients, print_lobbyists, OutputFormat};

#[derive(Args)]
pub struct EntityArgs {
    /// Name to search for
    #[arg(long)]
    pub name: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "25")]
    pub page_size: i64,
}

pub async fn run(
    args: &EntityArgs,
    kind: EntityKind,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let name = validation::validate_name(&args.name)?;
    let query = EntityQuery::default()
        .with_kind(kind)
        .with_name(&name)
        .with_page(validation::validate_page(args.page)?)
        .with_page_size(validation::validate_page_size(args.page_size)?);

    let resp = match kind {
        EntityKind::Client => client.search_clients(&query).await?,
        EntityKind::Lobbyist => client.search_lobbyists(&query).await?,
    };

    eprintln!(
        "Found {} {} match(es). Showing page {}.",
        resp.count, kind, args.page
    );

    match kind {
        EntityKind::Client => print_clients(&resp.results, format)?,
        EntityKind::Lobbyist => print_lobbyists(&resp.results, format)?,
    }

    Ok(())
}
