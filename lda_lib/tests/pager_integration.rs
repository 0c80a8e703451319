use std::time::{Duration, Instant};

use lda_lib::lda_api::Error as ApiError;
use lda_lib::{fetch_all, Client, FilingPages, FilingQuery, LdaError, PageOptions, Query};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_body(page: u32, last_page: u32, server: &MockServer) -> serde_json::Value {
    let next = if page < last_page {
        json!(format!("{}/filings/?client_id=1&page={}", server.uri(), page + 1))
    } else {
        json!(null)
    };
    json!({
        "count": last_page * 2,
        "next": next,
        "previous": null,
        "results": [
            {"filing_uuid": format!("p{}-a", page)},
            {"filing_uuid": format!("p{}-b", page)}
        ]
    })
}

async fn mount_pages(server: &MockServer, last_page: u32) {
    for page in 1..=last_page {
        Mock::given(method("GET"))
            .and(path("/filings/"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(page, last_page, server)))
            .mount(server)
            .await;
    }
}

fn test_client(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), "secret")
        .unwrap()
        .with_retry_delay(Duration::from_millis(10))
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn fetch_all_follows_next_until_exhausted() {
    let server = MockServer::start().await;
    mount_pages(&server, 4).await;

    let client = test_client(&server);
    let query = FilingQuery::default().with_client_id(1);
    let result = fetch_all(&client, &query, &PageOptions::default())
        .await
        .unwrap();

    assert_eq!(request_count(&server).await, 4);
    assert_eq!(result.fetched_pages, 4);
    assert_eq!(result.results().len(), 8);
    assert_eq!(result.results()[0]["filing_uuid"], "p1-a");
    assert_eq!(result.results()[7]["filing_uuid"], "p4-b");
    // Metadata comes from the first page.
    assert_eq!(result.page.count, 8);
    assert!(result.page.next.as_deref().unwrap().ends_with("page=2"));
}

#[tokio::test]
async fn max_pages_caps_requests_regardless_of_next() {
    let server = MockServer::start().await;
    mount_pages(&server, 4).await;

    let client = test_client(&server);
    let query = FilingQuery::default().with_client_id(1);
    let options = PageOptions::default().with_max_pages(2);
    let result = fetch_all(&client, &query, &options).await.unwrap();

    assert_eq!(request_count(&server).await, 2);
    assert_eq!(result.fetched_pages, 2);
    assert_eq!(result.results().len(), 4);
}

#[tokio::test]
async fn max_pages_one_fetches_only_the_first_page() {
    let server = MockServer::start().await;
    mount_pages(&server, 3).await;

    let client = test_client(&server);
    let query = FilingQuery::default().with_client_name("Acme");
    let options = PageOptions::default().with_max_pages(1);
    let result = fetch_all(&client, &query, &options).await.unwrap();

    assert_eq!(request_count(&server).await, 1);
    assert_eq!(result.fetched_pages, 1);
}

#[tokio::test]
async fn page_size_and_filters_are_sent_on_every_page() {
    let server = MockServer::start().await;
    for page in 1..=2u32 {
        Mock::given(method("GET"))
            .and(path("/filings/"))
            .and(query_param("page", page.to_string()))
            .and(query_param("page_size", "10"))
            .and(query_param("lobbyist_id", "42"))
            .and(query_param("filing_year", "2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(page, 2, &server)))
            .mount(&server)
            .await;
    }

    let client = test_client(&server);
    let query = FilingQuery::default()
        .with_lobbyist_id(42)
        .with_filter("filing_year", "2024")
        .with_page(7);
    let options = PageOptions::default().with_page_size(10);
    let result = fetch_all(&client, &query, &options).await.unwrap();
    assert_eq!(result.fetched_pages, 2);
}

#[tokio::test]
async fn pause_is_applied_between_pages() {
    let server = MockServer::start().await;
    mount_pages(&server, 3).await;

    let client = test_client(&server);
    let query = FilingQuery::default().with_client_id(1);
    let options = PageOptions::default().with_pause(Duration::from_millis(40));

    let started = Instant::now();
    let result = fetch_all(&client, &query, &options).await.unwrap();
    assert_eq!(result.fetched_pages, 3);
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn failure_mid_walk_returns_error_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/filings/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 3, &server)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/filings/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = FilingQuery::default().with_client_id(1);
    let err = fetch_all(&client, &query, &PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LdaError::Api(ApiError::HttpStatus { status: 503, .. })
    ));
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn unfiltered_walk_stops_with_invalid_query_before_page_two() {
    let server = MockServer::start().await;
    mount_pages(&server, 3).await;

    let client = test_client(&server);
    let err = fetch_all(&client, &FilingQuery::default(), &PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LdaError::Api(ApiError::InvalidQuery(_))));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn lazy_pages_end_after_last_page() {
    let server = MockServer::start().await;
    mount_pages(&server, 2).await;

    let client = test_client(&server);
    let query = FilingQuery::default().with_client_id(1);
    let mut pages = FilingPages::new(&client, &query, PageOptions::default());

    let first = pages.next_page().await.unwrap().unwrap();
    assert!(first.has_next());
    let second = pages.next_page().await.unwrap().unwrap();
    assert!(!second.has_next());
    assert!(pages.next_page().await.is_none());
    assert_eq!(pages.fetched_pages(), 2);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn progress_callback_sees_every_page() {
    let server = MockServer::start().await;
    mount_pages(&server, 3).await;

    let client = test_client(&server);
    let query = FilingQuery::default().with_client_id(1);
    let mut seen = Vec::new();
    let result = lda_lib::fetch_all_with_progress(
        &client,
        &query,
        &PageOptions::default(),
        |page, resp| seen.push((page, resp.results.len())),
    )
    .await
    .unwrap();

    assert_eq!(seen, vec![(1, 2), (2, 2), (3, 2)]);
    assert_eq!(result.fetched_pages, 3);
}
