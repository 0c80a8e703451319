use super::{
    common::{insert_name, FilterSet, QueryCommon},
    Query,
};
use crate::Error;

/// Filters that identify a client or lobbyist. The API only serves pages past
/// the first when at least one of them is present.
pub const IDENTIFYING_FILTERS: [&str; 4] =
    ["client_id", "client_name", "lobbyist_id", "lobbyist_name"];

/// Query builder for the `filings/` endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilingQuery {
    pub common: QueryCommon,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub lobbyist_id: Option<i64>,
    pub lobbyist_name: Option<String>,
}

impl Query for FilingQuery {
    fn common(&self) -> &QueryCommon {
        &self.common
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn filters(&self) -> Result<FilterSet, Error> {
        let mut filters = self.common.base_filters();
        if let Some(client_id) = self.client_id {
            filters.insert("client_id".to_string(), client_id.to_string());
        }
        insert_name(&mut filters, "client_name", self.client_name.as_ref());
        if let Some(lobbyist_id) = self.lobbyist_id {
            filters.insert("lobbyist_id".to_string(), lobbyist_id.to_string());
        }
        insert_name(&mut filters, "lobbyist_name", self.lobbyist_name.as_ref());
        self.common.merge_extra(&mut filters);

        let has_filter = IDENTIFYING_FILTERS
            .iter()
            .any(|key| filters.get(*key).is_some_and(|v| !v.is_empty()));
        if self.common.page > 1 && !has_filter {
            return Err(Error::InvalidQuery(
                "the API requires at least one filter when requesting page > 1".to_string(),
            ));
        }
        Ok(filters)
    }
}

impl FilingQuery {
    pub fn with_client_id(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_client_name(mut self, client_name: &str) -> Self {
        self.client_name = Some(client_name.to_string());
        self
    }

    pub fn with_lobbyist_id(mut self, lobbyist_id: i64) -> Self {
        self.lobbyist_id = Some(lobbyist_id);
        self
    }

    pub fn with_lobbyist_name(mut self, lobbyist_name: &str) -> Self {
        self.lobbyist_name = Some(lobbyist_name.to_string());
        self
    }

    /// Checks the page-gating rule without building a URL.
    pub fn validate(&self) -> Result<(), Error> {
        self.filters().map(|_| ())
    }
}
