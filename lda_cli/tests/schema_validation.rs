use lda_lib::types::{AggregatedResult, PageResponse};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root().join("lda_api/tests/fixtures").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn extract_results(fixture: &Value) -> Value {
    fixture["results"].clone()
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn test_page_fixtures_conform_to_schema() {
    let schema = load_schema("page_response.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("page schema compiles");

    for name in ["filings.json", "clients.json", "lobbyists.json"] {
        let fixture = load_fixture(name);
        if let Err(e) = validator.validate(&fixture) {
            panic!("{name} failed validation: {e}");
        }
    }
}

#[test]
fn test_filings_fixture_conforms_to_schema() {
    let fixture = load_fixture("filings.json");
    let schema = load_schema("filing.schema.json");
    let data = extract_results(&fixture);

    let validator = jsonschema::draft202012::new(&schema).expect("filing schema compiles");
    if let Err(e) = validator.validate(&data) {
        panic!("filings fixture failed validation: {e}");
    }
}

#[test]
fn test_aggregated_export_conforms_to_schema() {
    let page: PageResponse =
        serde_json::from_value(load_fixture("filings.json")).expect("fixture deserializes");
    let aggregated = AggregatedResult {
        page,
        fetched_pages: 1,
    };
    let exported = serde_json::to_value(&aggregated).expect("result serializes");

    let schema = load_schema("aggregated_result.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("aggregated schema compiles");
    if let Err(e) = validator.validate(&exported) {
        panic!("aggregated export failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_filing_schema_rejects_missing_uuid() {
    let fixture = load_fixture("filings.json");
    let schema = load_schema("filing.schema.json");
    let mut data = extract_results(&fixture);

    data[0]
        .as_object_mut()
        .expect("filing is an object")
        .remove("filing_uuid");

    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(
        validator.validate(&data).is_err(),
        "schema should reject filing missing filing_uuid"
    );
}

#[test]
fn test_filing_schema_rejects_string_year() {
    let fixture = load_fixture("filings.json");
    let schema = load_schema("filing.schema.json");
    let mut data = extract_results(&fixture);

    data[0]
        .as_object_mut()
        .expect("filing is an object")
        .insert("filing_year".to_string(), Value::String("2024".to_string()));

    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(
        validator.validate(&data).is_err(),
        "schema should reject a non-integer filing_year"
    );
}

#[test]
fn test_page_schema_rejects_missing_results() {
    let mut fixture = load_fixture("filings.json");
    fixture
        .as_object_mut()
        .expect("page is an object")
        .remove("results");

    let schema = load_schema("page_response.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(
        validator.validate(&fixture).is_err(),
        "schema should reject a page without results"
    );
}

#[test]
fn test_aggregated_schema_rejects_zero_pages() {
    let mut fixture = load_fixture("filings.json");
    fixture
        .as_object_mut()
        .expect("page is an object")
        .insert("fetched_pages".to_string(), Value::Number(0.into()));

    let schema = load_schema("aggregated_result.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(
        validator.validate(&fixture).is_err(),
        "schema should reject fetched_pages of zero"
    );
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn test_empty_results_conform() {
    let empty_page = serde_json::json!({
        "count": 0, "next": null, "previous": null, "results": []
    });
    let schema = load_schema("page_response.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.validate(&empty_page).is_ok());

    let schema = load_schema("filing.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.validate(&serde_json::json!([])).is_ok());
}
