//! Sequential walk over every page of a filings query.

use std::time::Duration;

use lda_api::types::{AggregatedResult, PageResponse};
use lda_api::{Client, FilingQuery, Query, DEFAULT_PAGE_SIZE};

use crate::error::LdaError;

/// Controls for a bulk fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct PageOptions {
    /// Results requested per page.
    pub page_size: i64,
    /// Pause between consecutive page requests. Zero disables pacing.
    pub pause: Duration,
    /// Stop after this many pages even if the server reports more.
    pub max_pages: Option<u32>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            pause: Duration::ZERO,
            max_pages: None,
        }
    }
}

impl PageOptions {
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

/// Lazy, single-pass sequence of filing pages.
///
/// Pages are requested one at a time starting at page 1. The sequence ends
/// after the first page whose `next` is empty, after page `max_pages`, or
/// after the first error.
pub struct FilingPages<'a> {
    client: &'a Client,
    query: FilingQuery,
    options: PageOptions,
    /// Number of the last page fetched; 0 before the first request.
    page: u32,
    done: bool,
}

impl<'a> FilingPages<'a> {
    /// Starts a walk over `query`. Any page already set on the query is ignored.
    pub fn new(client: &'a Client, query: &FilingQuery, options: PageOptions) -> Self {
        Self {
            client,
            query: query.clone(),
            options,
            page: 0,
            done: false,
        }
    }

    /// Number of pages fetched so far.
    pub fn fetched_pages(&self) -> u32 {
        self.page
    }

    /// Fetches the next page, or returns `None` once the walk has ended.
    pub async fn next_page(&mut self) -> Option<Result<PageResponse, LdaError>> {
        if self.done {
            return None;
        }
        if self.page > 0 && !self.options.pause.is_zero() {
            tokio::time::sleep(self.options.pause).await;
        }

        let page = self.page + 1;
        let query = self
            .query
            .clone()
            .with_page(i64::from(page))
            .with_page_size(self.options.page_size);

        let resp = match self.client.list_filings(&query).await {
            Ok(resp) => resp,
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        };
        self.page = page;

        let capped = self.options.max_pages.is_some_and(|max| page >= max);
        if !resp.has_next() || capped {
            self.done = true;
        }
        tracing::info!(
            "Filings page {} ({} items, {} total)",
            page,
            resp.results.len(),
            resp.count
        );
        Some(Ok(resp))
    }
}

/// Fetches every page of `query` and merges them into one result.
///
/// The first page supplies the metadata; `results` is the concatenation of
/// all pages. An error on any page aborts the whole fetch.
pub async fn fetch_all(
    client: &Client,
    query: &FilingQuery,
    options: &PageOptions,
) -> Result<AggregatedResult, LdaError> {
    fetch_all_with_progress(client, query, options, |_, _| {}).await
}

/// [`fetch_all`], calling `on_page` with the page number and response after each page.
pub async fn fetch_all_with_progress<F>(
    client: &Client,
    query: &FilingQuery,
    options: &PageOptions,
    mut on_page: F,
) -> Result<AggregatedResult, LdaError>
where
    F: FnMut(u32, &PageResponse),
{
    let mut pages = FilingPages::new(client, query, options.clone());
    let mut first: Option<PageResponse> = None;
    let mut results = Vec::new();

    while let Some(page) = pages.next_page().await {
        let mut page = page?;
        on_page(pages.fetched_pages(), &page);
        results.append(&mut page.results);
        if first.is_none() {
            first = Some(page);
        }
    }

    let mut merged = first.unwrap_or_default();
    merged.results = results;
    Ok(AggregatedResult {
        page: merged,
        fetched_pages: pages.fetched_pages(),
    })
}
