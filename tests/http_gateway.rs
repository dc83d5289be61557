// End-to-end tests against a mock Compute Engine API served from an
// in-process axum router on an ephemeral port.
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use gce_mcp::config::{ComputeConfig, GceConfig};
use gce_mcp::mcp::{dto::McpRequest, handler};
use gce_mcp::{http, GceServer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct MockCompute {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    body: Arc<Value>,
}

async fn mock_list(
    State(state): State<MockCompute>,
    Path((_project, _zone)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    // The gateway always caps the page size at 50.
    if params.get("maxResults").map(String::as_str) != Some("50") {
        return Err(StatusCode::BAD_REQUEST);
    }
    if state.status != StatusCode::OK {
        return Err(state.status);
    }
    Ok(Json(state.body.as_ref().clone()))
}

async fn spawn_mock(status: StatusCode, body: Value) -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockCompute {
        hits: Arc::clone(&hits),
        status,
        body: Arc::new(body),
    };
    let app = Router::new()
        .route("/projects/:project/zones/:zone/instances", get(mock_list))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, hits)
}

fn gateway_config(api_base: String) -> GceConfig {
    GceConfig {
        compute: ComputeConfig {
            api_base: Some(api_base),
        },
        ..GceConfig::default()
    }
}

async fn spawn_gateway(api_base: String) -> SocketAddr {
    let server = GceServer::new(gateway_config(api_base));
    let app = http::router(Arc::new(server));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn list_instances_end_to_end() {
    let (upstream, _hits) = spawn_mock(StatusCode::OK, json!({"items": [{"name": "vm-a"}]})).await;
    let gateway = spawn_gateway(format!("http://{}", upstream)).await;

    let client = reqwest::Client::new();
    let resp: Value = client
        .post(format!("http://{}/mcp", gateway))
        .json(&json!({
            "id": 1,
            "method": "tools/call",
            "params": {
                "name": "list_instances",
                "arguments": { "project": "p1", "zone": "z1" }
            }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(resp["jsonrpc"], "2.0");
    assert_eq!(resp["id"], 1);
    assert!(resp.get("error").is_none());

    let content = resp["result"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "text");

    // The payload is a pretty-printed JSON string, never structured data.
    let text = content[0]["text"].as_str().unwrap();
    assert!(text.starts_with("{\n  \"instances\""));
    let embedded: Value = serde_json::from_str(text).unwrap();
    assert_eq!(embedded, json!({"instances": [{"name": "vm-a"}]}));
}

#[tokio::test]
async fn upstream_without_items_yields_empty_list() {
    let (upstream, _hits) = spawn_mock(StatusCode::OK, json!({"kind": "compute#instanceList"})).await;
    let gateway = spawn_gateway(format!("http://{}", upstream)).await;

    let client = reqwest::Client::new();
    let resp: Value = client
        .post(format!("http://{}/mcp", gateway))
        .json(&json!({
            "id": 2,
            "method": "tools/call",
            "params": {
                "name": "list_instances",
                "arguments": { "project": "p1", "zone": "z1" }
            }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(resp.get("error").is_none());
    let text = resp["result"]["content"][0]["text"].as_str().unwrap();
    let embedded: Value = serde_json::from_str(text).unwrap();
    assert_eq!(embedded, json!({"instances": []}));
}

#[tokio::test]
async fn upstream_failure_maps_to_server_error() {
    let (upstream, _hits) = spawn_mock(StatusCode::FORBIDDEN, json!({})).await;
    let gateway = spawn_gateway(format!("http://{}", upstream)).await;

    let client = reqwest::Client::new();
    let resp: Value = client
        .post(format!("http://{}/mcp", gateway))
        .json(&json!({
            "id": 3,
            "method": "tools/call",
            "params": {
                "name": "list_instances",
                "arguments": { "project": "p1", "zone": "z1" }
            }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(resp["id"], 3);
    assert!(resp.get("result").is_none());
    assert_eq!(resp["error"]["code"], -32000);
    assert!(!resp["error"]["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_returns_parse_error_envelope() {
    let gateway = spawn_gateway("http://127.0.0.1:9".to_string()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/mcp", gateway))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let resp: Value = response.json().await.unwrap();
    assert_eq!(resp["jsonrpc"], "2.0");
    assert_eq!(resp["id"], Value::Null);
    assert_eq!(resp["error"]["code"], -32700);
    assert!(resp.get("result").is_none());
}

#[tokio::test]
async fn compute_client_is_constructed_once_across_calls() {
    let (upstream, hits) = spawn_mock(StatusCode::OK, json!({"items": []})).await;
    let server = GceServer::new(gateway_config(format!("http://{}", upstream)));

    for i in 0..3 {
        let req = McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(i)),
            method: "tools/call".to_string(),
            params: Some(json!({
                "name": "list_instances",
                "arguments": { "project": "p1", "zone": "z1" }
            })),
        };
        let resp = handler::handle_request(&server, req).await;
        assert!(resp.error.is_none(), "call {} failed", i);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);

    // Same handle every time: the cell initialized exactly once.
    let first: *const _ = server.compute().await.unwrap();
    let second: *const _ = server.compute().await.unwrap();
    assert!(std::ptr::eq(first, second));
}
