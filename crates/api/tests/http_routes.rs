//! Router tests: JSON API, tile page and health endpoint.

mod support;

use axum::http::StatusCode;
use sectorgrid_domain::{Config, Record, SectorGridError};
use serde_json::json;
use support::{StubSource, TestApp};
use uuid::Uuid;

#[tokio::test]
async fn test_grid_json_for_scenario() {
    let app = TestApp::scenario();

    let (status, body) = app.get_json("/api/grid").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_count"], 4);
    assert_eq!(body["grid"]["rows"], 2);
    assert_eq!(body["grid"]["cols"], 2);

    let a1 = &body["grid"]["cells"][0][0]["sector"];
    assert_eq!(a1["sector_id"], "A1");
    assert_eq!(a1["total_quantity"], 10);
    assert_eq!(a1["tiles"][0]["code"], "SKU1");
    assert_eq!(a1["tiles"][0]["quantity"], 8);
    assert_eq!(a1["tiles"][0]["color"], "#0c9a21");
    assert_eq!(a1["tiles"][1]["color"], "#e6344e");

    assert!(body["grid"]["cells"][0][1]["sector"].is_null());
    assert_eq!(body["grid"]["cells"][1][1]["sector"]["sector_id"], "B2");
}

#[tokio::test]
async fn test_configured_column_limit_applies() {
    let mut config = Config::default();
    config.layout.max_column = 5;
    let records = vec![Record::new("A5", "SKU1", 1), Record::new("A6", "SKU1", 1)];
    let app = TestApp::with_config(config, StubSource::new(records));

    let (status, body) = app.get_json("/api/grid").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grid"]["cols"], 5);
    assert_eq!(body["grid"]["cells"][0][4]["sector"]["sector_id"], "A5");
    assert_eq!(body["grid"]["unmapped"][0]["sector_id"], "A6");
}

#[tokio::test]
async fn test_repeated_reads_use_cached_snapshot() {
    let app = TestApp::scenario();

    app.get_json("/api/grid").await;
    app.get_json("/api/grid").await;

    assert_eq!(app.source.load_count(), 1);
}

#[tokio::test]
async fn test_refresh_reloads_source() {
    let app = TestApp::scenario();
    app.get_json("/api/grid").await;

    app.source.set_records(vec![Record::new("C3", "SKU9", 7)]);
    let (status, body) = app.post_empty("/api/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invalidated"], true);

    let (_, grid) = app.get_json("/api/grid").await;
    assert_eq!(grid["record_count"], 1);
    assert_eq!(grid["grid"]["cells"][2][2]["sector"]["sector_id"], "C3");
    assert_eq!(app.source.load_count(), 2);
}

#[tokio::test]
async fn test_schema_error_is_unprocessable() {
    let app = TestApp::new(StubSource::with_columns(&["code"], vec![]));

    let (status, body) = app.get_json("/api/grid").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], "Schema");
    assert_eq!(body["error"]["message"]["missing"], json!(["sector", "quantity"]));
}

#[tokio::test]
async fn test_session_select_and_detail() {
    let app = TestApp::scenario();

    let (status, created) = app.post_empty("/api/sessions").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["selection"]["state"], "unselected");
    let id = created["session_id"].as_str().unwrap().to_string();

    let (status, selected) = app
        .post_json(&format!("/api/sessions/{id}/select"), json!({"sector": "A1", "code": "SKU1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selected["selection"], json!({"state": "selected", "sector": "A1", "code": "SKU1"}));

    let (status, detail) = app.get_json(&format!("/api/sessions/{id}/detail")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["tile"]["quantity"], 8);
    let records = detail["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["quantity"], 5);
    assert_eq!(records[0]["description"], "pallet");
    assert_eq!(records[1]["quantity"], 3);

    let (_, cleared) = app.post_empty(&format!("/api/sessions/{id}/clear")).await;
    assert_eq!(cleared["selection"]["state"], "unselected");

    let (_, detail) = app.get_json(&format!("/api/sessions/{id}/detail")).await;
    assert_eq!(detail["records"], json!([]));
    assert!(detail["tile"].is_null());
}

#[tokio::test]
async fn test_sessions_do_not_share_selection() {
    let app = TestApp::scenario();
    let (_, first) = app.post_empty("/api/sessions").await;
    let (_, second) = app.post_empty("/api/sessions").await;
    let first = first["session_id"].as_str().unwrap().to_string();
    let second = second["session_id"].as_str().unwrap().to_string();

    app.post_json(
        &format!("/api/sessions/{first}/events"),
        json!({"event": "tile_clicked", "sector": "B2", "code": "SKU1"}),
    )
    .await;

    let (_, other) = app.get_json(&format!("/api/sessions/{second}")).await;
    assert_eq!(other["selection"]["state"], "unselected");
    let (_, mine) = app.get_json(&format!("/api/sessions/{first}")).await;
    assert_eq!(mine["selection"]["sector"], "B2");
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = TestApp::scenario();

    let (status, body) = app.get_json(&format!("/api/sessions/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "NotFound");
}

#[tokio::test]
async fn test_blank_click_is_bad_request() {
    let app = TestApp::scenario();
    let (_, created) = app.post_empty("/api/sessions").await;
    let id = created["session_id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post_json(&format!("/api/sessions/{id}/select"), json!({"sector": " ", "code": "SKU1"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "InvalidInput");
}

#[tokio::test]
async fn test_page_renders_tiles() {
    let app = TestApp::scenario();

    let (status, html) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<div class="grilla" style="grid-template-columns: repeat(2, 120px);">"#));
    assert!(html.contains(r#"<div class="sector-label">A1</div>"#));
    assert!(html.contains(r#"style="background-color:#0c9a21;" title="SKU1""#));
    assert!(html.contains(">8</a>"));
    assert!(html.contains(">2</a>"));
    assert_eq!(html.matches(r#"class="sector blank""#).count(), 2);
    assert!(!html.contains(r#"class="detail""#));
}

#[tokio::test]
async fn test_page_click_opens_and_closes_detail() {
    let app = TestApp::scenario();
    let session = Uuid::new_v4();

    let (_, html) = app.get(&format!("/?session={session}&sector=A1&code=SKU1")).await;
    assert!(html.contains(r#"class="detail""#));
    assert!(html.contains("<td>pallet</td>"));
    assert!(html.contains(r#"class="sku selected""#));

    let (_, html) = app.get(&format!("/?session={session}")).await;
    assert!(html.contains(r#"class="detail""#), "selection persists across reloads");

    let (_, html) = app.get(&format!("/?session={session}&close=true")).await;
    assert!(!html.contains(r#"class="detail""#));
}

#[tokio::test]
async fn test_page_escapes_sector_names() {
    let app = TestApp::new(StubSource::new(vec![Record::new("<b>", "SKU1", 1)]));

    let (status, html) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("&lt;b&gt;"));
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn test_page_shows_user_message_on_schema_error() {
    let app = TestApp::new(StubSource::with_columns(&["sector", "code"], vec![]));

    let (status, html) = app.get("/").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("missing required column(s): quantity"));
}

#[tokio::test]
async fn test_health_reports_source_state() {
    let app = TestApp::scenario();

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_healthy"], true);
    assert_eq!(body["components"][0]["name"], "inventory_source");

    app.source.fail_with(SectorGridError::Database("connection refused".into()));
    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["is_healthy"], false);
}
