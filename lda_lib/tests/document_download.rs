use std::time::Duration;

use lda_lib::{download_filing_document, Client, LdaError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), "secret")
        .unwrap()
        .with_retry_delay(Duration::from_millis(10))
        .with_document_base_url(&format!("{}/filings/public/filing", server.uri()))
}

#[tokio::test]
async fn downloads_document_bytes_to_destination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/filings/public/filing/abc/print/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>report</html>"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("filing.html");
    let record = json!({"filing_uuid": "abc"}).as_object().unwrap().clone();

    let written = download_filing_document(&test_client(&server), &record, &dest)
        .await
        .unwrap();
    assert_eq!(written, dest);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "<html>report</html>");
}

#[tokio::test]
async fn missing_uuid_fails_without_request() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("filing.html");

    for record in [json!({}), json!({"filing_uuid": null}), json!({"filing_uuid": ""})] {
        let record = record.as_object().unwrap().clone();
        let err = download_filing_document(&test_client(&server), &record, &dest)
            .await
            .unwrap_err();
        assert!(matches!(err, LdaError::MissingIdentifier(_)));
    }
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(!dest.exists());
}

#[tokio::test]
async fn not_found_document_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("filing.html");
    let record = json!({"filing_uuid": "nope"}).as_object().unwrap().clone();

    let err = download_filing_document(&test_client(&server), &record, &dest)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LdaError::Api(lda_lib::lda_api::Error::HttpStatus { status: 404, .. })
    ));
}
