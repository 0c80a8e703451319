//! Download of the printable disclosure document behind a filing.

use std::path::{Path, PathBuf};

use lda_api::types::Record;
use lda_api::Client;

use crate::error::LdaError;
use crate::normalize::field_text;

/// Downloads the document for `record` to `destination` and returns the path written.
///
/// The server returns HTML; the bytes are stored unchanged.
pub async fn download_filing_document(
    client: &Client,
    record: &Record,
    destination: &Path,
) -> Result<PathBuf, LdaError> {
    let filing_uuid = field_text(record, "filing_uuid").ok_or_else(|| {
        LdaError::MissingIdentifier("filing lacks a filing_uuid; cannot download".to_string())
    })?;
    let bytes = client.fetch_document(&filing_uuid).await?;
    tokio::fs::write(destination, &bytes).await?;
    tracing::info!(
        "Downloaded filing {} ({} bytes) to {}",
        filing_uuid,
        bytes.len(),
        destination.display()
    );
    Ok(destination.to_path_buf())
}
