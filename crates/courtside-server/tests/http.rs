// End-to-end tests against a real listener on an ephemeral port.

use std::net::SocketAddr;
use std::path::PathBuf;

use courtside_core::dataset::loader::{fallback_dataset, load_path};
use courtside_server::routes::{routes, AppContext};
use serde_json::{json, Value};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../courtside-core/tests/fixtures/players.csv")
}

fn spawn(ctx: AppContext) -> SocketAddr {
    let (addr, server) = warp::serve(routes(ctx)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

async fn post_chart(addr: SocketAddr, body: Value) -> (u16, Value) {
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/api/chart"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status().as_u16();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_reports_loaded_file() {
    let ctx = AppContext::new(load_path(&fixture()).unwrap());
    let addr = spawn(ctx);

    let v: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(v["status"], "ok");
    assert_eq!(v["rows"], 16);
    assert_eq!(v["fallback"], false);
    assert!(v["source"].as_str().unwrap().ends_with("players.csv"));
}

#[tokio::test]
async fn options_cover_fixture_dropdowns() {
    let addr = spawn(AppContext::new(load_path(&fixture()).unwrap()));

    let v: Value = reqwest::get(format!("http://{addr}/api/options"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(v["players"].as_array().unwrap().len(), 16);
    assert_eq!(v["teams"].as_array().unwrap().len(), 9);
    assert_eq!(v["metrics"], json!(["PTS", "REB", "AST"]));
    assert!(v["decades"].as_array().unwrap().contains(&json!(1990)));
}

#[tokio::test]
async fn college_chart_over_http() {
    let addr = spawn(AppContext::new(load_path(&fixture()).unwrap()));

    let (status, v) = post_chart(addr, json!({"chart": "college_pipeline", "metric": "PTS"})).await;

    assert_eq!(status, 200);
    assert_eq!(v["chart"], "college-pipeline-chart");
    assert_eq!(
        v["figure"]["layout"]["title"]["text"],
        "Top 20 Colleges by Average PTS"
    );
    assert_eq!(v["figure"]["data"][0]["x"], json!(["Duke"]));
    assert_eq!(v["figure"]["data"][0]["y"], json!([15.8]));
}

#[tokio::test]
async fn bad_decade_renders_placeholder() {
    let addr = spawn(AppContext::new(fallback_dataset()));

    let (status, v) = post_chart(
        addr,
        json!({"chart": "position_distribution", "metric": "PTS", "decade": 1995}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(v["chart"], "position-distribution-chart");
    assert_eq!(v["figure"]["data"], json!([]));
    assert!(v["figure"]["layout"]["annotations"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Error generating chart"));
}

#[tokio::test]
async fn unknown_chart_kind_is_rejected() {
    let addr = spawn(AppContext::new(fallback_dataset()));

    let (status, v) = post_chart(addr, json!({"chart": "shot_map"})).await;

    assert_eq!(status, 400);
    assert_eq!(v["chart"], Value::Null);
}
