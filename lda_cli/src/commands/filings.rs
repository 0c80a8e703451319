//! The `filings` subcommand: single-page listing, bulk fetch and file exports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use lda_lib::types::{AggregatedResult, Record};
use lda_lib::{
    download_filing_document, fetch_all_with_progress, flatten_record, simplify, validation,
    write_json, write_table, Client, EntityQuery, FilingQuery, PageOptions, Query, Row,
    SIMPLE_CSV_FIELDS,
};

use crate::output::{print_clients, print_filings, print_lobbyists, OutputFormat};

/// Arguments for the `filings` subcommand.
///
/// Any of the `--output-*` flags implies `--all-pages`.
#[derive(Args)]
pub struct FilingsArgs {
    /// Client ID filter
    #[arg(long)]
    pub client_id: Option<i64>,

    /// Client name filter
    #[arg(long)]
    pub client_name: Option<String>,

    /// Lobbyist ID filter
    #[arg(long)]
    pub lobbyist_id: Option<i64>,

    /// Lobbyist name filter
    #[arg(long)]
    pub lobbyist_name: Option<String>,

    /// Extra API filter as KEY=VALUE (repeatable), e.g. filing_year=2024
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Page number (single-page mode)
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "25")]
    pub page_size: i64,

    /// Fetch every page that matches the filters
    #[arg(long)]
    pub all_pages: bool,

    /// Stop a bulk fetch after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Seconds to pause between page requests during a bulk fetch
    #[arg(long, default_value = "0.25")]
    pub pause: f64,

    /// Write the full filings payload as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub output_json: Option<PathBuf>,

    /// Write a flattened CSV of every filing field to FILE
    #[arg(long, value_name = "FILE")]
    pub output_csv: Option<PathBuf>,

    /// Write a simplified CSV with curated columns to FILE
    #[arg(long, value_name = "FILE")]
    pub output_simple_csv: Option<PathBuf>,

    /// Download the printable document of the first filing to PATH
    #[arg(long, value_name = "PATH")]
    pub download_first: Option<PathBuf>,
}

impl FilingsArgs {
    fn wants_all_pages(&self) -> bool {
        self.all_pages
            || self.output_json.is_some()
            || self.output_csv.is_some()
            || self.output_simple_csv.is_some()
    }

    fn build_query(&self) -> Result<FilingQuery> {
        let mut query = FilingQuery::default();
        if let Some(client_id) = self.client_id {
            query = query.with_client_id(client_id);
        }
        if let Some(ref name) = self.client_name {
            query = query.with_client_name(&validation::validate_name(name)?);
        }
        if let Some(lobbyist_id) = self.lobbyist_id {
            query = query.with_lobbyist_id(lobbyist_id);
        }
        if let Some(ref name) = self.lobbyist_name {
            query = query.with_lobbyist_name(&validation::validate_name(name)?);
        }
        let extras = self
            .filters
            .iter()
            .map(|raw| validation::parse_filter(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(query.with_filters(extras))
    }
}

pub async fn run(args: &FilingsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let page_size = validation::validate_page_size(args.page_size)?;
    let query = args.build_query()?;

    // Name-only filters: show the matching entities first so the user can pick an ID.
    if let (Some(name), None) = (&query.client_name, args.client_id) {
        let matches = client.search_clients(&EntityQuery::clients(name)).await?;
        eprintln!(
            "Found {} client match(es). Showing first page.",
            matches.count
        );
        print_clients(&matches.results, format)?;
    }
    if let (Some(name), None) = (&query.lobbyist_name, args.lobbyist_id) {
        let matches = client
            .search_lobbyists(&EntityQuery::lobbyists(name))
            .await?;
        eprintln!(
            "Found {} lobbyist match(es). Showing first page.",
            matches.count
        );
        print_lobbyists(&matches.results, format)?;
    }

    let fetch_all = args.wants_all_pages();
    let result = if fetch_all {
        let mut options = PageOptions::default()
            .with_page_size(page_size)
            .with_pause(validation::validate_pause(args.pause)?);
        if let Some(max_pages) = args.max_pages {
            options = options.with_max_pages(validation::validate_max_pages(max_pages)?);
        }
        bulk_fetch(client, &query, &options).await?
    } else {
        let query = query
            .with_page(validation::validate_page(args.page)?)
            .with_page_size(page_size);
        let page = client.list_filings(&query).await?;
        AggregatedResult {
            page,
            fetched_pages: 1,
        }
    };

    let results = result.results();
    eprintln!(
        "Filings count: {} ({} fetched over {} page(s))",
        result.page.count,
        results.len(),
        result.fetched_pages
    );

    let shown = if fetch_all {
        &results[..results.len().min(page_size as usize)]
    } else {
        results
    };
    print_filings(shown, format)?;
    if results.len() > shown.len() {
        eprintln!(
            "...and {} more filings (use --output-json/--output-csv to save everything).",
            results.len() - shown.len()
        );
    }

    export(args, &result)?;

    if let Some(ref dest) = args.download_first {
        if let Some(first) = results.first() {
            let path = download_filing_document(client, first, dest).await?;
            eprintln!("Downloaded first filing document to {}", display_path(&path));
        } else {
            eprintln!("No filings matched; nothing to download.");
        }
    }

    Ok(())
}

async fn bulk_fetch(
    client: &Client,
    query: &FilingQuery,
    options: &PageOptions,
) -> Result<AggregatedResult> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("-\\|/ "),
    );
    pb.set_message("fetching filings...");

    let mut total = 0usize;
    let result = fetch_all_with_progress(client, query, options, |page, resp| {
        total += resp.results.len();
        pb.set_message(format!("page {} ({} filings so far)", page, total));
        pb.tick();
    })
    .await;

    match result {
        Ok(result) => {
            pb.finish_with_message(format!(
                "fetched {} filings over {} page(s)",
                result.results().len(),
                result.fetched_pages
            ));
            Ok(result)
        }
        Err(e) => {
            pb.abandon_with_message("fetch failed");
            Err(e.into())
        }
    }
}

fn export(args: &FilingsArgs, result: &AggregatedResult) -> Result<()> {
    let results: &[Record] = result.results();

    if let Some(ref path) = args.output_json {
        write_json(path, result)
            .with_context(|| format!("writing JSON to {}", path.display()))?;
        eprintln!(
            "Wrote {} filings to {}",
            results.len(),
            display_path(path)
        );
    }

    if let Some(ref path) = args.output_csv {
        let rows: Vec<Row> = results.iter().map(flatten_record).collect();
        write_table(path, &rows, None)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        eprintln!(
            "Wrote CSV summary with {} rows to {}",
            rows.len(),
            display_path(path)
        );
    }

    if let Some(ref path) = args.output_simple_csv {
        let rows: Vec<Row> = results.iter().map(simplify).collect();
        write_table(path, &rows, Some(&SIMPLE_CSV_FIELDS[..]))
            .with_context(|| format!("writing simplified CSV to {}", path.display()))?;
        eprintln!(
            "Wrote simplified CSV with {} rows to {}",
            rows.len(),
            display_path(path)
        );
    }

    Ok(())
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
