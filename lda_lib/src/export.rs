//! CSV and JSON writers for fetched filings.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lda_api::types::AggregatedResult;

use crate::error::LdaError;
use crate::normalize::{value_text, Row};

/// Columns for rows without a fixed schema: the sorted union of every row's keys.
pub fn infer_columns(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Writes `rows` as CSV to `writer`.
///
/// With `fieldnames` the header is exactly that list, missing keys become
/// empty cells and keys outside the list are dropped. Without it the header
/// is [`infer_columns`]. The header is written even when there are no rows.
pub fn write_table_to<W: Write>(
    writer: W,
    rows: &[Row],
    fieldnames: Option<&[&str]>,
) -> Result<(), LdaError> {
    let columns: Vec<String> = match fieldnames {
        Some(names) => names.iter().map(|name| name.to_string()).collect(),
        None => infer_columns(rows),
    };

    if columns.is_empty() {
        // No columns means every line, header included, is empty.
        let mut writer = writer;
        for _ in 0..=rows.len() {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        return Ok(());
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&columns)?;
    for row in rows {
        wtr.write_record(columns.iter().map(|column| {
            row.get(column.as_str()).map(value_text).unwrap_or_default()
        }))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `rows` as CSV to the file at `path`, replacing it.
pub fn write_table(
    path: &Path,
    rows: &[Row],
    fieldnames: Option<&[&str]>,
) -> Result<(), LdaError> {
    let file = BufWriter::new(File::create(path)?);
    write_table_to(file, rows, fieldnames)?;
    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Writes the full aggregated result as pretty-printed JSON.
pub fn write_json(path: &Path, result: &AggregatedResult) -> Result<(), LdaError> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, result)?;
    file.write_all(b"\n")?;
    file.flush()?;
    tracing::info!(
        "Wrote {} filings to {}",
        result.results().len(),
        path.display()
    );
    Ok(())
}
