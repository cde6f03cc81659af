//! CSV import against a live server.

use std::time::{Duration, Instant};
use task_api::import::{parse_rows, read_rows, ImportSummary, Importer};

mod common;

#[tokio::test]
async fn test_import_creates_tasks_in_file_order() {
    let server = common::start_server().await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("tasks.csv");
    std::fs::write(
        &csv_path,
        "title,description\nTask 01,Descrição da Task 01\nTask 02,Second\n\nTask 03,Third\n",
    )
    .unwrap();

    let rows = read_rows(&csv_path).unwrap();
    assert_eq!(rows.len(), 3);

    let importer = Importer::new(&server.base_url(), Duration::ZERO).unwrap();
    let summary = importer.run(&rows).await;
    assert_eq!(summary, ImportSummary { sent: 3, failed: 0 });

    let tasks = server.db.select("tasks", None).await;
    let titles: Vec<_> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Task 01", "Task 02", "Task 03"]);
    assert_eq!(tasks[0]["description"], "Descrição da Task 01");
}

#[tokio::test]
async fn test_rejected_rows_are_counted_and_skipped() {
    let server = common::start_server().await;

    let rows = parse_rows("title,description\nGood,row\nMissing description\nAlso good,yes\n".as_bytes())
        .unwrap();
    let importer = Importer::new(&server.base_url(), Duration::ZERO).unwrap();
    let summary = importer.run(&rows).await;

    assert_eq!(summary, ImportSummary { sent: 2, failed: 1 });
    assert_eq!(server.db.select("tasks", None).await.len(), 2);
}

#[tokio::test]
async fn test_requests_are_paced() {
    let server = common::start_server().await;

    let rows = parse_rows("title,description\na,1\nb,2\n".as_bytes()).unwrap();
    let importer = Importer::new(&server.base_url(), Duration::from_millis(100)).unwrap();

    let started = Instant::now();
    importer.run(&rows).await;
    assert!(started.elapsed() >= Duration::from_millis(200));
}
