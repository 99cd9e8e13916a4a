use crate::common::{read_rows, Workspace, FULL_LISTING, NO_PRICE_LISTING};
use listing_scout::input::BatchRequest;
use listing_scout::output::{WriteMode, HEADER};
use listing_scout::pipeline::{AutoConfirm, Confirmation, RunOutcome, INVALID_URL_MESSAGE};
use listing_scout::state::FailureStage;
use listing_scout::RunSummary;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completed(outcome: RunOutcome) -> RunSummary {
    match outcome {
        RunOutcome::Completed(summary) => summary,
        RunOutcome::Aborted => panic!("run was unexpectedly aborted"),
    }
}

#[tokio::test]
async fn test_mixed_batch_keeps_order_and_records_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homedetails/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/homedetails/2"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/homedetails/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(FULL_LISTING, "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let batch = BatchRequest::from_urls(vec![
        format!("{}/homedetails/1", base),
        format!("{}/homedetails/2", base),
        format!("{}/homedetails/3", base),
    ])
    .unwrap();

    let workspace = Workspace::new();
    let mut coordinator = workspace.coordinator(WriteMode::Create);
    let summary = completed(
        coordinator
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.failures_by_stage.get(&FailureStage::Fetch), Some(&2));

    let (header, rows) = read_rows(&workspace.output());
    assert_eq!(header, HEADER);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0][0], format!("{}/homedetails/1", base));
    assert_eq!(rows[0][1], "123 Main St, Springfield, IL 62701");
    assert_eq!(rows[0][2], "0.25 acres");
    assert_eq!(rows[0][3], "$450,000");
    assert_eq!(rows[0][4], "$215");
    assert_eq!(rows[0][5], "12 days");
    assert_eq!(rows[0][7], "");

    assert_eq!(rows[1][0], format!("{}/homedetails/2", base));
    assert_eq!(&rows[1][1..6], ["N/A", "N/A", "N/A", "N/A", "N/A"]);
    assert_eq!(rows[1][7], "HTTP 403");

    assert_eq!(rows[2][0], format!("{}/homedetails/3", base));
    assert_eq!(&rows[2][1..6], ["N/A", "N/A", "N/A", "N/A", "N/A"]);
    assert_eq!(rows[2][7], "timeout");

    let log = std::fs::read_to_string(workspace.error_log()).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.contains("ERROR fetch"));
    assert!(log.contains("- HTTP 403"));
    assert!(log.contains("- timeout"));
}

#[tokio::test]
async fn test_invalid_url_never_reaches_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Same server by name, so the host lacks the configured token
    let foreign = mock_server.uri().replace("127.0.0.1", "localhost");
    let batch = BatchRequest::from_urls(vec![
        format!("{}/homedetails/1", foreign),
        "not a url".to_string(),
    ])
    .unwrap();

    let workspace = Workspace::new();
    let mut coordinator = workspace.coordinator(WriteMode::Create);
    let summary = completed(
        coordinator
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(summary.failed, 2);
    assert_eq!(
        summary.failures_by_stage.get(&FailureStage::Validation),
        Some(&2)
    );

    let (_, rows) = read_rows(&workspace.output());
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row[7], INVALID_URL_MESSAGE);
        assert_eq!(&row[1..6], ["N/A", "N/A", "N/A", "N/A", "N/A"]);
        assert!(!row[6].is_empty());
    }
}

#[tokio::test]
async fn test_missing_price_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homedetails/9"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(NO_PRICE_LISTING, "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let batch = BatchRequest::single(format!("{}/homedetails/9", mock_server.uri())).unwrap();

    let workspace = Workspace::new();
    let mut coordinator = workspace.coordinator(WriteMode::Create);
    let summary = completed(
        coordinator
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);

    let (_, rows) = read_rows(&workspace.output());
    assert_eq!(rows[0][1], "9 Elm St, Dover, DE 19901");
    assert_eq!(rows[0][3], "N/A");
    assert_eq!(rows[0][7], "");
    assert!(!workspace.error_log().exists());
}

#[tokio::test]
async fn test_page_without_fields_is_an_empty_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body></body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let batch = BatchRequest::single(format!("{}/homedetails/0", mock_server.uri())).unwrap();

    let workspace = Workspace::new();
    let summary = completed(
        workspace
            .coordinator(WriteMode::Create)
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.empty, 1);
}

#[tokio::test]
async fn test_non_html_response_fails_at_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&mock_server)
        .await;

    let batch = BatchRequest::single(format!("{}/api/listing", mock_server.uri())).unwrap();

    let workspace = Workspace::new();
    let summary = completed(
        workspace
            .coordinator(WriteMode::Create)
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(
        summary.failures_by_stage.get(&FailureStage::Extraction),
        Some(&1)
    );

    let (_, rows) = read_rows(&workspace.output());
    assert!(rows[0][7].starts_with("Parsing error: unsupported content type"));
    assert!(rows[0][7].contains("application/json"));
}

#[tokio::test]
async fn test_connection_refused_is_recorded() {
    // Nothing listens on port 1
    let batch = BatchRequest::single("http://127.0.0.1:1/homedetails/1").unwrap();

    let workspace = Workspace::new();
    let summary = completed(
        workspace
            .coordinator(WriteMode::Create)
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(summary.failed, 1);
    let (_, rows) = read_rows(&workspace.output());
    assert!(rows[0][7].starts_with("connection failed") || rows[0][7].starts_with("request failed"));
}

#[tokio::test]
async fn test_declined_large_batch_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let urls = (0..25)
        .map(|i| format!("{}/homedetails/{}", mock_server.uri(), i))
        .collect();
    let batch = BatchRequest::from_urls(urls).unwrap();

    let workspace = Workspace::new();
    let mut coordinator = workspace.coordinator_with_threshold(WriteMode::Create, 20);
    let outcome = coordinator
        .run(&batch, &mut AutoConfirm(false))
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Aborted));
    assert!(!workspace.output().exists());
    assert!(!workspace.error_log().exists());
}

/// Accepts and remembers how many prompts it saw
struct CountingConfirmation {
    prompts: usize,
}

impl Confirmation for CountingConfirmation {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.prompts += 1;
        true
    }
}

#[tokio::test]
async fn test_confirmed_large_batch_writes_every_row() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .expect(25)
        .mount(&mock_server)
        .await;

    let urls = (0..25)
        .map(|i| format!("{}/homedetails/{}", mock_server.uri(), i))
        .collect();
    let batch = BatchRequest::from_urls(urls).unwrap();

    let workspace = Workspace::new();
    let mut confirmation = CountingConfirmation { prompts: 0 };
    let summary = completed(
        workspace
            .coordinator_with_threshold(WriteMode::Create, 20)
            .run(&batch, &mut confirmation)
            .await
            .unwrap(),
    );

    assert_eq!(confirmation.prompts, 1);
    assert_eq!(summary.attempted, 25);
    assert_eq!(read_rows(&workspace.output()).1.len(), 25);
}

async fn listing_server(expected: u64) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .expect(expected)
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_pauses_between_requests_only() {
    let mock_server = listing_server(3).await;
    let batch = BatchRequest::from_urls(
        (1..=3)
            .map(|i| format!("{}/homedetails/{}", mock_server.uri(), i))
            .collect(),
    )
    .unwrap();

    let workspace = Workspace::new();
    let mut coordinator = workspace.coordinator(WriteMode::Create);
    completed(
        coordinator
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(coordinator.rate_limiter().pauses(), 2);
}

#[tokio::test]
async fn test_single_url_never_pauses() {
    let mock_server = listing_server(1).await;
    let batch = BatchRequest::single(format!("{}/homedetails/1", mock_server.uri())).unwrap();

    let workspace = Workspace::new();
    let mut coordinator = workspace.coordinator(WriteMode::Create);
    completed(
        coordinator
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(coordinator.rate_limiter().pauses(), 0);
}

#[tokio::test]
async fn test_invalid_url_is_not_followed_by_a_pause() {
    let mock_server = listing_server(2).await;
    let batch = BatchRequest::from_urls(vec![
        format!("{}/homedetails/1", mock_server.uri()),
        "not a url".to_string(),
        format!("{}/homedetails/2", mock_server.uri()),
    ])
    .unwrap();

    let workspace = Workspace::new();
    let mut coordinator = workspace.coordinator(WriteMode::Create);
    let summary = completed(
        coordinator
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap(),
    );

    assert_eq!(summary.attempted, 3);
    assert_eq!(coordinator.rate_limiter().pauses(), 1);
}
