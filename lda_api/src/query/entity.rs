use super::{
    common::{insert_name, FilterSet, QueryCommon},
    Query,
};
use crate::Error;

/// The kind of entity an [`EntityQuery`] searches for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntityKind {
    #[default]
    Client,
    Lobbyist,
}

impl EntityKind {
    /// Relative path of the search endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Client => "clients/",
            EntityKind::Lobbyist => "lobbyists/",
        }
    }

    /// Name of the filter the endpoint matches names against.
    pub fn name_filter(&self) -> &'static str {
        match self {
            EntityKind::Client => "client_name",
            EntityKind::Lobbyist => "lobbyist_name",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EntityKind::Client => "client",
                EntityKind::Lobbyist => "lobbyist",
            }
        )
    }
}

/// Query builder for the `clients/` and `lobbyists/` name searches.
///
/// Unlike [`FilingQuery`](super::FilingQuery) these endpoints accept any page
/// without an identifying filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityQuery {
    pub common: QueryCommon,
    pub kind: EntityKind,
    pub name: Option<String>,
}

impl Query for EntityQuery {
    fn common(&self) -> &QueryCommon {
        &self.common
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn filters(&self) -> Result<FilterSet, Error> {
        let mut filters = self.common.base_filters();
        insert_name(&mut filters, self.kind.name_filter(), self.name.as_ref());
        self.common.merge_extra(&mut filters);
        Ok(filters)
    }
}

impl EntityQuery {
    pub fn clients(name: &str) -> Self {
        Self::default().with_kind(EntityKind::Client).with_name(name)
    }

    pub fn lobbyists(name: &str) -> Self {
        Self::default().with_kind(EntityKind::Lobbyist).with_name(name)
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}
