mod meta;
pub use self::meta::{AggregatedResult, PageResponse, Record};
