mod common;
pub use self::common::{FilterSet, Query, QueryCommon, DEFAULT_PAGE_SIZE};

mod filing;
pub use self::filing::{FilingQuery, IDENTIFYING_FILTERS};

mod entity;
pub use self::entity::{EntityKind, EntityQuery};
