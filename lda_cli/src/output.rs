use anyhow::Result;
use lda_lib::normalize::{field_text, person_name};
use lda_lib::types::Record;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct ClientRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Legacy Client ID")]
    #[serde(rename = "Legacy Client ID")]
    legacy_id: String,
}

#[derive(Tabled, Serialize)]
struct LobbyistRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Registrant")]
    #[serde(rename = "Registrant")]
    registrant: String,
}

#[derive(Tabled, Serialize)]
struct FilingRow {
    #[tabled(rename = "Filing UUID")]
    #[serde(rename = "Filing UUID")]
    filing_uuid: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    filing_type: String,
    #[tabled(rename = "Registrant")]
    #[serde(rename = "Registrant")]
    registrant: String,
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: String,
}

// -- Field helpers --

fn registrant_name(entry: &Record) -> String {
    entry
        .get("registrant")
        .and_then(|v| v.as_object())
        .and_then(|r| field_text(r, "name").or_else(|| field_text(r, "registrant_name")))
        .unwrap_or_else(|| "Unknown Registrant".to_string())
}

fn id_text(entry: &Record) -> String {
    field_text(entry, "id").unwrap_or_else(|| "?".to_string())
}

// -- Row builders --

fn build_client_rows(clients: &[Record]) -> Vec<ClientRow> {
    clients
        .iter()
        .map(|c| ClientRow {
            id: id_text(c),
            name: field_text(c, "client_name")
                .or_else(|| field_text(c, "name"))
                .unwrap_or_else(|| "<unknown>".to_string()),
            legacy_id: field_text(c, "client_id").unwrap_or_default(),
        })
        .collect()
}

fn build_lobbyist_rows(lobbyists: &[Record]) -> Vec<LobbyistRow> {
    lobbyists
        .iter()
        .map(|l| {
            let name = field_text(l, "lobbyist_name")
                .or_else(|| field_text(l, "name"))
                .unwrap_or_else(|| person_name(l));
            LobbyistRow {
                id: id_text(l),
                name: if name.is_empty() {
                    "<unknown>".to_string()
                } else {
                    name
                },
                registrant: registrant_name(l),
            }
        })
        .collect()
}

fn build_filing_rows(filings: &[Record]) -> Vec<FilingRow> {
    filings
        .iter()
        .map(|f| FilingRow {
            filing_uuid: field_text(f, "filing_uuid").unwrap_or_default(),
            filing_type: field_text(f, "filing_type").unwrap_or_default(),
            registrant: registrant_name(f),
            year: field_text(f, "filing_year").unwrap_or_default(),
        })
        .collect()
}

// -- Generic printers --

fn print_rows<T: Tabled + Serialize>(
    rows: &[T],
    records: &[Record],
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&records),
    }
    Ok(())
}

pub fn print_clients(clients: &[Record], format: &OutputFormat) -> Result<()> {
    print_rows(&build_client_rows(clients), clients, format)
}

pub fn print_lobbyists(lobbyists: &[Record], format: &OutputFormat) -> Result<()> {
    print_rows(&build_lobbyist_rows(lobbyists), lobbyists, format)
}

pub fn print_filings(filings: &[Record], format: &OutputFormat) -> Result<()> {
    print_rows(&build_filing_rows(filings), filings, format)
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
