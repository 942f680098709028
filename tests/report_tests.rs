use std::sync::{Arc, Mutex};

use predicates::prelude::*;
use serde_json::Value;
use tokio::task;
use warp::Filter;

const REPORT_FILE: &str = "TGE_TrackTrace4Tools_ROI_Report.pdf";

fn spawn_webhook(status: warp::http::StatusCode) -> (std::net::SocketAddr, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let store = received.clone();
    let route = warp::path("hook")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |body: Value| {
            store.lock().unwrap().push(body);
            warp::reply::with_status("", status)
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, received)
}

fn report_args(dir: &assert_fs::TempDir, name: &str, email: &str, company: &str) -> Vec<String> {
    vec![
        "report".to_string(),
        "--name".to_string(),
        name.to_string(),
        "--email".to_string(),
        email.to_string(),
        "--company".to_string(),
        company.to_string(),
        "-o".to_string(),
        dir.path().to_str().unwrap().to_string(),
    ]
}

#[tokio::test]
async fn report_forwards_lead_and_saves_pdf() {
    let (addr, received) = spawn_webhook(warp::http::StatusCode::OK);
    let dir = assert_fs::TempDir::new().unwrap();
    let args = report_args(&dir, "Jane Doe", "jane@acme.test", "Acme Ltd.");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("roi-estimator");
        cmd.env("LEAD_WEBHOOK_URL", format!("http://{addr}/hook"));
        cmd.args(&args);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("ROI report written to"))
            .stdout(predicate::str::contains("Your details were sent"));
    })
    .await
    .unwrap();

    let leads = received.lock().unwrap().clone();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["name"], "Jane Doe");
    assert_eq!(leads[0]["email"], "jane@acme.test");
    assert_eq!(leads[0]["company"], "Acme Ltd.");
    assert_eq!(leads[0]["currency"], "AED");
    assert_eq!(leads[0]["outputs"]["totalAnnualSavings"], 46800.0);

    let bytes = std::fs::read(dir.path().join(REPORT_FILE)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn failing_webhook_still_saves_pdf() {
    let (addr, received) = spawn_webhook(warp::http::StatusCode::BAD_GATEWAY);
    let dir = assert_fs::TempDir::new().unwrap();
    let args = report_args(&dir, "Jane Doe", "jane@acme.test", "Acme Ltd.");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("roi-estimator");
        cmd.env("LEAD_WEBHOOK_URL", format!("http://{addr}/hook"));
        cmd.args(&args);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("ROI report written to"))
            .stdout(predicate::str::contains("Your details were sent").not());
    })
    .await
    .unwrap();

    assert_eq!(received.lock().unwrap().len(), 1);
    assert!(dir.path().join(REPORT_FILE).exists());
}

#[tokio::test]
async fn blank_contact_field_blocks_export() {
    let (addr, received) = spawn_webhook(warp::http::StatusCode::OK);
    let dir = assert_fs::TempDir::new().unwrap();
    let args = report_args(&dir, "Jane Doe", "   ", "Acme Ltd.");

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("roi-estimator");
        cmd.env("LEAD_WEBHOOK_URL", format!("http://{addr}/hook"));
        cmd.args(&args);
        cmd.assert()
            .stderr(predicate::str::contains("Name, email and company are required"));
    })
    .await
    .unwrap();

    assert!(received.lock().unwrap().is_empty());
    assert!(!dir.path().join(REPORT_FILE).exists());
}

#[test]
fn report_without_webhook_saves_pdf() {
    let dir = assert_fs::TempDir::new().unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("roi-estimator");
    cmd.env_remove("LEAD_WEBHOOK_URL");
    cmd.args(report_args(&dir, "Jane Doe", "jane@acme.test", "Acme Ltd."));
    cmd.args(["--advanced", "--locale", "de-DE", "--currency", "EUR"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ROI report written to"));

    let bytes = std::fs::read(dir.path().join(REPORT_FILE)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}
