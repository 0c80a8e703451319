//! Library layer for the Lobbying Disclosure client: bulk paging, record
//! normalization, CSV/JSON export and document download.
//!
//! Wraps the `lda_api` crate, which owns the HTTP transport and query builders.

pub mod document;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pager;
pub mod validation;

pub use lda_api;
pub use lda_api::types;
pub use lda_api::{
    Client, EntityKind, EntityQuery, FilingQuery, FilterSet, Query, DEFAULT_PAGE_SIZE,
};

pub use document::download_filing_document;
pub use error::LdaError;
pub use export::{infer_columns, write_json, write_table, write_table_to};
pub use normalize::{flatten, flatten_record, person_name, simplify, Row, SIMPLE_CSV_FIELDS};
pub use pager::{fetch_all, fetch_all_with_progress, FilingPages, PageOptions};
