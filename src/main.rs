use anyhow::Result;
use gce_mcp::http;
use gce_mcp::mcp::{dto::McpRequest, handler};
use gce_mcp::{GceConfig, GceServer};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gce_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env for local dev (if present)
    if dotenvy::dotenv().is_ok() {
        tracing::info!("Loaded .env");
    }

    tracing::info!("Starting GCE MCP Gateway");

    // Load configuration
    let config = GceConfig::from_env()?;
    tracing::info!(
        "Configuration loaded: transport={}, port={}",
        config.server.transport,
        config.server.port
    );

    // Create server instance
    let server = GceServer::new(config.clone());

    let tools = server.get_tools();
    tracing::info!("Available tools: {}", tools.len());
    for tool in tools {
        tracing::info!("  - {}: {}", tool.name, tool.description);
    }

    match config.server.transport.to_lowercase().as_str() {
        "http" => {
            tracing::info!(
                "GCE MCP Gateway running with HTTP transport on port {}",
                config.server.port
            );
            http::run_http_server(server, config.server.port).await?;
            Ok(())
        }
        _ => {
            tracing::info!("GCE MCP Gateway running with stdio transport");

            // Handle stdio MCP protocol
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let mut reader = BufReader::new(stdin);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => break, // EOF
                    Ok(_) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }

                        tracing::debug!("Received: {}", line);

                        let response = match serde_json::from_str::<McpRequest>(line) {
                            Ok(request) => handler::handle_request(&server, request).await,
                            Err(e) => {
                                tracing::error!("Failed to parse request: {}", e);
                                handler::parse_error_response()
                            }
                        };

                        let response_json = serde_json::to_string(&response)?;
                        tracing::debug!("Sending: {}", response_json);

                        stdout.write_all(response_json.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                    Err(e) => {
                        tracing::error!("Error reading from stdin: {}", e);
                        break;
                    }
                }
            }

            tracing::info!("GCE MCP Gateway shutting down");
            Ok(())
        }
    }
}
