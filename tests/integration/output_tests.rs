use crate::common::{read_rows, Workspace, FULL_LISTING};
use listing_scout::input::BatchRequest;
use listing_scout::output::WriteMode;
use listing_scout::pipeline::{scrape, AutoConfirm, RunOutcome};
use listing_scout::ScoutError;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn listing_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_append_twice_keeps_one_header() {
    let mock_server = listing_server().await;
    let batch = BatchRequest::single(format!("{}/homedetails/1", mock_server.uri())).unwrap();
    let workspace = Workspace::new();

    for _ in 0..2 {
        let outcome = workspace
            .coordinator(WriteMode::Append)
            .run(&batch, &mut AutoConfirm(false))
            .await
            .unwrap();
        assert!(matches!(outcome, RunOutcome::Completed(_)));
    }

    let content = std::fs::read_to_string(workspace.output()).unwrap();
    assert_eq!(content.matches("url,address").count(), 1);

    let (_, rows) = read_rows(&workspace.output());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][3], "$450,000");
    assert_eq!(rows[1][3], "$450,000");
}

#[tokio::test]
async fn test_create_overwrites_previous_run() {
    let mock_server = listing_server().await;
    let batch = BatchRequest::from_urls(vec![
        format!("{}/homedetails/1", mock_server.uri()),
        format!("{}/homedetails/2", mock_server.uri()),
    ])
    .unwrap();
    let workspace = Workspace::new();

    workspace
        .coordinator(WriteMode::Create)
        .run(&batch, &mut AutoConfirm(false))
        .await
        .unwrap();

    let single = BatchRequest::single(format!("{}/homedetails/3", mock_server.uri())).unwrap();
    workspace
        .coordinator(WriteMode::Create)
        .run(&single, &mut AutoConfirm(false))
        .await
        .unwrap();

    let (_, rows) = read_rows(&workspace.output());
    assert_eq!(rows.len(), 1);
    assert!(rows[0][0].ends_with("/homedetails/3"));
}

#[tokio::test]
async fn test_append_to_foreign_file_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let batch = BatchRequest::from_urls(
        (1..=3)
            .map(|i| format!("{}/homedetails/{}", mock_server.uri(), i))
            .collect(),
    )
    .unwrap();
    let workspace = Workspace::new();
    std::fs::write(workspace.output(), "name,email\nada,ada@example.com\n").unwrap();

    let result = workspace
        .coordinator(WriteMode::Append)
        .run(&batch, &mut AutoConfirm(false))
        .await;

    assert!(matches!(result, Err(ScoutError::Write(_))));
    let content = std::fs::read_to_string(workspace.output()).unwrap();
    assert_eq!(content, "name,email\nada,ada@example.com\n");
}

#[tokio::test]
async fn test_missing_output_directory_fails_before_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FULL_LISTING, "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let batch = BatchRequest::from_urls(vec![
        format!("{}/homedetails/1", mock_server.uri()),
        format!("{}/homedetails/2", mock_server.uri()),
    ])
    .unwrap();
    let workspace = Workspace::new();
    let output = workspace.dir.path().join("missing").join("out.csv");

    let result = scrape(
        workspace.config(),
        &batch,
        output.clone(),
        WriteMode::Create,
        &mut AutoConfirm(false),
    )
    .await;

    assert!(matches!(result, Err(ScoutError::Write(_))));
    assert!(!output.exists());
    assert!(!workspace.error_log().exists());
}

#[tokio::test]
async fn test_rows_match_file_input() {
    let mock_server = listing_server().await;
    let content = format!(
        "# saved searches\n{0}/homedetails/1\n\n{0}/homedetails/1\nnot-a-listing\n",
        mock_server.uri()
    );
    let batch = BatchRequest::from_lines(&content).unwrap();
    let workspace = Workspace::new();

    let outcome = scrape(
        workspace.config(),
        &batch,
        workspace.output(),
        WriteMode::Create,
        &mut AutoConfirm(false),
    )
    .await
    .unwrap();

    let summary = match outcome {
        RunOutcome::Completed(summary) => summary,
        RunOutcome::Aborted => panic!("small batch should not prompt"),
    };
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.output_path, workspace.output());
    assert_eq!(read_rows(&workspace.output()).1.len(), 3);
}
