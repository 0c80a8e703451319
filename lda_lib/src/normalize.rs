//! Turns raw filing records into flat rows for tabular export.
//!
//! [`flatten`] keeps every field under a dotted path and JSON-encodes lists,
//! so any record maps to a rectangular row. [`simplify`] derives the fixed
//! [`SIMPLE_CSV_FIELDS`] columns through per-column fallback chains.

use std::collections::HashSet;

use lda_api::types::Record;
use serde_json::{Map, Value};

/// A flat row: column name to scalar value.
pub type Row = Map<String, Value>;

/// Columns of the simplified export, in output order.
pub const SIMPLE_CSV_FIELDS: [&str; 15] = [
    "registrant_name",
    "registrant_address",
    "registrant_contact",
    "registrant_phone",
    "senate_id",
    "client_name",
    "filing_information",
    "income",
    "expenses",
    "expenses_method",
    "dt_posted",
    "description",
    "government_entities",
    "filing_uuid",
    "filing_document_url",
];

/// Flattens nested maps into dotted keys under `prefix`, joined with `sep`.
///
/// Lists are not walked: the whole list becomes one JSON string value.
/// Scalars, including null, are copied as-is.
pub fn flatten(record: &Map<String, Value>, prefix: &str, sep: &str) -> Row {
    let mut items = Row::new();
    flatten_into(record, prefix, sep, &mut items);
    items
}

/// [`flatten`] with no prefix and `.` as separator.
pub fn flatten_record(record: &Record) -> Row {
    flatten(record, "", ".")
}

fn flatten_into(record: &Map<String, Value>, prefix: &str, sep: &str, out: &mut Row) {
    for (key, value) in record {
        let new_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", prefix, sep, key)
        };
        match value {
            Value::Object(nested) => flatten_into(nested, &new_key, sep, out),
            Value::Array(_) => {
                out.insert(new_key, Value::String(value.to_string()));
            }
            other => {
                out.insert(new_key, other.clone());
            }
        }
    }
}

/// Whether a value counts as present: null, `false`, zero and empty
/// strings/lists/maps do not.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Renders a value as cell text. Strings are unquoted, null is empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text of `map[key]` when present.
pub fn field_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).filter(|v| is_present(v)).map(value_text)
}

/// Where a fallback step looks up its key.
#[derive(Clone, Copy, Debug)]
enum Scope {
    Record,
    Registrant,
    Client,
}

/// Ordered lookups for one value; the first present one wins.
type Fallback = &'static [(Scope, &'static str)];

const ADDRESS_LINE_1: Fallback = &[
    (Scope::Record, "registrant_address_1"),
    (Scope::Registrant, "address_1"),
];
const ADDRESS_LINE_2: Fallback = &[
    (Scope::Record, "registrant_address_2"),
    (Scope::Registrant, "address_2"),
];
const CITY: Fallback = &[(Scope::Record, "registrant_city"), (Scope::Registrant, "city")];
const STATE: Fallback = &[
    (Scope::Record, "registrant_state"),
    (Scope::Registrant, "state_display"),
    (Scope::Registrant, "state"),
];
const POSTAL_CODE: Fallback = &[(Scope::Record, "registrant_zip"), (Scope::Registrant, "zip")];
const COUNTRY: Fallback = &[
    (Scope::Record, "registrant_country"),
    (Scope::Registrant, "country_display"),
    (Scope::Registrant, "country"),
];
const ADDRESS_PARTS: [Fallback; 6] = [
    ADDRESS_LINE_1,
    ADDRESS_LINE_2,
    CITY,
    STATE,
    POSTAL_CODE,
    COUNTRY,
];

const REGISTRANT_NAME: Fallback = &[(Scope::Registrant, "name")];
const REGISTRANT_CONTACT: Fallback = &[(Scope::Registrant, "contact_name")];
const REGISTRANT_PHONE: Fallback = &[(Scope::Registrant, "contact_telephone")];
const REGISTRANT_ID: Fallback = &[(Scope::Registrant, "id")];
const CLIENT_LEGACY_ID: Fallback = &[(Scope::Client, "client_id"), (Scope::Client, "id")];
const CLIENT_NAME: Fallback = &[(Scope::Client, "name")];

const FILING_YEAR: Fallback = &[(Scope::Record, "filing_year")];
const FILING_PERIOD: Fallback = &[
    (Scope::Record, "filing_period_display"),
    (Scope::Record, "filing_period"),
];
const FILING_TYPE: Fallback = &[
    (Scope::Record, "filing_type_display"),
    (Scope::Record, "filing_type"),
];
const EXPENSES_METHOD: Fallback = &[
    (Scope::Record, "expenses_method_display"),
    (Scope::Record, "expenses_method"),
];

/// Passed through untouched; only null or absent becomes empty.
const PASSTHROUGH: [&str; 5] = [
    "income",
    "expenses",
    "dt_posted",
    "filing_uuid",
    "filing_document_url",
];

struct Sources<'a> {
    record: &'a Record,
    registrant: Option<&'a Map<String, Value>>,
    client: Option<&'a Map<String, Value>>,
}

impl<'a> Sources<'a> {
    fn new(record: &'a Record) -> Self {
        Self {
            record,
            registrant: record.get("registrant").and_then(Value::as_object),
            client: record.get("client").and_then(Value::as_object),
        }
    }

    fn scope(&self, scope: Scope) -> Option<&'a Map<String, Value>> {
        match scope {
            Scope::Record => Some(self.record),
            Scope::Registrant => self.registrant,
            Scope::Client => self.client,
        }
    }

    fn resolve(&self, chain: Fallback) -> Option<&'a Value> {
        chain.iter().find_map(|(scope, key)| {
            self.scope(*scope)
                .and_then(|map| map.get(*key))
                .filter(|v| is_present(v))
        })
    }

    fn text(&self, chain: Fallback) -> String {
        self.resolve(chain).map(value_text).unwrap_or_default()
    }

    fn activities(&self) -> impl Iterator<Item = &'a Map<String, Value>> {
        let record: &'a Record = self.record;
        record
            .get("lobbying_activities")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }
}

/// Keeps the first occurrence of each non-empty value, in order.
fn unique<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for value in values {
        if value.is_empty() || !seen.insert(value.clone()) {
            continue;
        }
        ordered.push(value);
    }
    ordered
}

/// Collapses runs of whitespace into single spaces and trims the ends.
fn normalize_text(value: &Value) -> String {
    value_text(value)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_trimmed<I>(parts: I, sep: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Space-joined display name from the prefix, first, middle, last and suffix fields.
pub fn person_name(data: &Map<String, Value>) -> String {
    let pick = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| field_text(data, key))
            .unwrap_or_default()
    };
    join_trimmed(
        [
            pick(&["prefix_display", "prefix"]),
            pick(&["first_name"]),
            pick(&["middle_name"]),
            pick(&["last_name"]),
            pick(&["suffix_display", "suffix"]),
        ],
        " ",
    )
}

/// Derives the simplified row for one filing.
///
/// Every column of [`SIMPLE_CSV_FIELDS`] is present in the result; columns
/// with no source value are empty strings.
pub fn simplify(record: &Record) -> Row {
    let sources = Sources::new(record);

    let registrant_address = join_trimmed(
        ADDRESS_PARTS.iter().map(|chain| sources.text(*chain)),
        ", ",
    );

    let senate_id = match (
        sources.resolve(REGISTRANT_ID),
        sources.resolve(CLIENT_LEGACY_ID),
    ) {
        (Some(registrant_id), Some(client_id)) => {
            format!("{}-{}", value_text(registrant_id), value_text(client_id))
        }
        _ => String::new(),
    };

    let filing_information = join_trimmed(
        [
            sources.text(FILING_YEAR),
            sources.text(FILING_PERIOD),
            sources.text(FILING_TYPE),
        ],
        " | ",
    );

    let description = unique(sources.activities().map(|activity| {
        activity
            .get("description")
            .map(normalize_text)
            .unwrap_or_default()
    }));

    let government_entities = unique(
        sources
            .activities()
            .filter_map(|activity| activity.get("government_entities"))
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_object)
            .filter_map(|entity| field_text(entity, "name")),
    );

    let mut row = Row::new();
    let mut put = |key: &str, value: String| {
        row.insert(key.to_string(), Value::String(value));
    };
    put("registrant_name", sources.text(REGISTRANT_NAME));
    put("registrant_address", registrant_address);
    put("registrant_contact", sources.text(REGISTRANT_CONTACT));
    put("registrant_phone", sources.text(REGISTRANT_PHONE));
    put("senate_id", senate_id);
    put("client_name", sources.text(CLIENT_NAME));
    put("filing_information", filing_information);
    put("expenses_method", sources.text(EXPENSES_METHOD));
    put("description", description.join("; "));
    put("government_entities", government_entities.join("; "));

    for key in PASSTHROUGH {
        let value = match record.get(key) {
            None | Some(Value::Null) => Value::String(String::new()),
            Some(value) => value.clone(),
        };
        row.insert(key.to_string(), value);
    }
    row
}
