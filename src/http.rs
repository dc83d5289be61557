use crate::mcp::dto::McpResponse;
use crate::mcp::handler;
use crate::GceServer;
use anyhow::Result;
use axum::{routing::post, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
struct AppState {
    server: Arc<GceServer>,
}

// The body is decoded by hand: a malformed payload must still come back as a
// JSON-RPC envelope, not as the framework's rejection.
async fn handle_rpc(
    axum::extract::State(state): axum::extract::State<AppState>,
    body: String,
) -> Json<McpResponse> {
    let res = match serde_json::from_str(&body) {
        Ok(req) => handler::handle_request(&state.server, req).await,
        Err(_) => handler::parse_error_response(),
    };
    Json(res)
}

pub fn router(server: Arc<GceServer>) -> Router {
    Router::new()
        .route("/mcp", post(handle_rpc))
        .with_state(AppState { server })
}

pub async fn run_http_server(server: GceServer, port: u16) -> Result<()> {
    let app = router(Arc::new(server));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP MCP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
