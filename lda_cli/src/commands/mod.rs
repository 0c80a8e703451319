//! CLI subcommand implementations.

pub mod entities;
pub mod filings;
