#![allow(clippy::unwrap_used)]
// Integration tests for `DvrClipExtraction` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wserest_api::{ConversionState, ConvertOptions, DvrClipExtraction, Settings, WseClient};

// ── Helpers ─────────────────────────────────────────────────────────

const STORES: &str = "/v2/servers/_defaultServer_/vhosts/_defaultVHost_/applications/live/instances/_definst_/dvrstores";

async fn setup() -> (MockServer, DvrClipExtraction) {
    let server = MockServer::start().await;
    let settings = Settings::new(format!("{}/v2", server.uri()));
    let client = Arc::new(WseClient::new(settings).unwrap());
    (server, DvrClipExtraction::new(client, "live", ""))
}

fn ack() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "", "data": null }))
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_stores() {
    let (server, dvr) = setup().await;

    Mock::given(method("GET"))
        .and(path(STORES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "serverName": "_defaultServer_",
            "version": "1.0",
            "dvrconverterstoresummary": [
                { "name": "myStream.0", "location": "dvr/_definst_/myStream.0" },
                { "name": "other.0", "location": "dvr/_definst_/other.0" }
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let stores = dvr.get_all().await.unwrap();
    assert_eq!(stores.stores.len(), 2);
    assert_eq!(stores.stores[1].id, "other.0");
    assert_eq!(stores.stores[0].location, "dvr/_definst_/myStream.0");

    let raw = dvr.get_all_raw().await.unwrap();
    assert_eq!(raw["version"], json!("1.0"));
}

#[tokio::test]
async fn test_get_item_reports_conversion_status() {
    let (server, dvr) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{STORES}/myStream.0")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "serverName": "_defaultServer_",
            "dvrStoreName": "myStream.0",
            "DvrConverterStore": {
                "dvrStoreName": "myStream.0",
                "isLive": false,
                "outputFilename": "myStream.0_clip.mp4",
                "conversionStatus": {
                    "storeName": "myStream.0",
                    "state": "SUCCESS",
                    "currentChunk": 25,
                    "chunkCount": 25
                }
            }
        })))
        .mount(&server)
        .await;

    let converter = dvr.get_item("myStream.0").await.unwrap();
    assert_eq!(converter.id, "myStream.0");
    assert_eq!(converter.store.output_filename, "myStream.0_clip.mp4");
    let state = converter.store.conversion_status.state();
    assert_eq!(state, ConversionState::Success);
    assert!(state.is_finished());

    let raw = dvr.get_item_raw("myStream.0").await.unwrap();
    assert_eq!(raw["dvrStoreName"], json!("myStream.0"));
}

// ── Conversions ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_convert_with_range() {
    let (server, dvr) = setup().await;

    Mock::given(method("PUT"))
        .and(path(format!("{STORES}/myStream.0/actions/convert")))
        .and(query_param("dvrConverterStartTime", "1700000000"))
        .and(query_param("dvrConverterEndTime", "1700000120"))
        .and(query_param("dvrConverterOutputFilename", "clip.mp4"))
        .and(query_param_is_missing("dvrConverterDuration"))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    let options = ConvertOptions::range(
        Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        Utc.timestamp_opt(1_700_000_120, 0).unwrap(),
    )
    .output_filename("clip.mp4");

    dvr.convert("myStream.0", &options).await.unwrap();
}

#[tokio::test]
async fn test_convert_by_duration_from_start() {
    let (server, dvr) = setup().await;

    Mock::given(method("PUT"))
        .and(path(format!("{STORES}/myStream.0/actions/convert")))
        .and(query_param("dvrConverterStartTime", "1700000000"))
        .and(query_param("dvrConverterDuration", "45000"))
        .and(query_param_is_missing("dvrConverterEndTime"))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    let options = ConvertOptions::from_start(
        Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        Duration::from_secs(45),
    );
    dvr.convert("myStream.0", &options).await.unwrap();
}

#[tokio::test]
async fn test_debug_conversions() {
    let (server, dvr) = setup().await;

    Mock::given(method("PUT"))
        .and(path(format!("{STORES}/myStream.0/actions/convert")))
        .and(query_param("dvrConverterDebugConversions", "true"))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    dvr.debug_conversions("myStream.0").await.unwrap();
}

#[tokio::test]
async fn test_convert_group() {
    let (server, dvr) = setup().await;

    Mock::given(method("PUT"))
        .and(path(format!("{STORES}/actions/convert")))
        .and(query_param("dvrConverterStoreList", "a.0,b.0"))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    dvr.convert_group(&["a.0", "b.0"]).await.unwrap();
}

// ── Store lifecycle ─────────────────────────────────────────────────

#[tokio::test]
async fn test_create_clear_cache_and_remove() {
    let (server, dvr) = setup().await;

    Mock::given(method("POST"))
        .and(path(STORES))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{STORES}/actions/expire")))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{STORES}/myStream.0")))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    dvr.create().await.unwrap();
    dvr.clear_cache().await.unwrap();
    let resp = dvr.remove("myStream.0").await.unwrap();
    assert_eq!(resp["success"], json!(true));
}

#[tokio::test]
async fn test_server_error_is_passed_through() {
    let (server, dvr) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("converter crashed"))
        .mount(&server)
        .await;

    let err = dvr.clear_cache().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("converter crashed"));
}
