//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields and [`FilterSet`].

use std::collections::BTreeMap;

use url::Url;

use crate::Error;

/// Filter name to value, exactly as sent in the query string.
pub type FilterSet = BTreeMap<String, String>;

/// Results per page when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Trait implemented by all query builders. Provides filter-set assembly,
/// URL serialization and shared builder methods for pagination and
/// caller-supplied filters.
pub trait Query {
    /// Builds the filter set sent to the API, rejecting combinations the API refuses.
    fn filters(&self) -> Result<FilterSet, Error>;

    /// Returns a reference to the common query fields.
    fn common(&self) -> &QueryCommon;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Result<Url, Error> {
        let mut url = url.clone();
        for (key, value) in self.filters()? {
            url.query_pairs_mut().append_pair(&key, &value);
        }
        Ok(url)
    }

    /// Returns the page number currently set (1-indexed).
    fn page(&self) -> i64 {
        self.common().page
    }

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of results per page.
    fn with_page_size(mut self, page_size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = page_size;
        self
    }

    /// Adds a raw filter. Applied after the named parameters, so it wins on collision.
    fn with_filter(mut self, key: &str, value: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common()
            .extra
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Adds several raw filters at once.
    fn with_filters<I, K, V>(mut self, filters: I) -> Self
    where
        Self: Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.get_common()
            .extra
            .extend(filters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Fields shared by all query types: pagination and caller-supplied filters.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
    /// Results per page. Defaults to [`DEFAULT_PAGE_SIZE`].
    pub page_size: i64,
    /// Additional filters merged last into the filter set.
    pub extra: FilterSet,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            extra: FilterSet::new(),
        }
    }
}

impl QueryCommon {
    /// Writes the pagination parameters into a fresh filter set.
    pub fn base_filters(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.insert("page".to_string(), self.page.to_string());
        filters.insert("page_size".to_string(), self.page_size.to_string());
        filters
    }

    /// Merges the caller-supplied filters over `filters`.
    pub fn merge_extra(&self, filters: &mut FilterSet) {
        for (key, value) in &self.extra {
            filters.insert(key.clone(), value.clone());
        }
    }
}

pub(crate) fn insert_name(filters: &mut FilterSet, key: &str, value: Option<&String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        filters.insert(key.to_string(), value.clone());
    }
}
