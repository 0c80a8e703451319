mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{
    Client, DEFAULT_BASE_URL, DEFAULT_DOCUMENT_BASE_URL, DEFAULT_TIMEOUT, MAX_TIMEOUT_RETRIES,
    RETRY_DELAY,
};
pub use self::errors::Error;
pub use self::query::{
    EntityKind, EntityQuery, FilingQuery, FilterSet, Query, QueryCommon, DEFAULT_PAGE_SIZE,
    IDENTIFYING_FILTERS,
};
