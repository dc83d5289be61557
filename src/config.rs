use crate::error::{GceError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GceConfig {
    pub server: ServerConfig,
    pub compute: ComputeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
    pub transport: String, // "stdio", "http"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeConfig {
    // Endpoint override for emulators and tests. Overridden endpoints are
    // called without credentials; the real endpoint always resolves ADC.
    pub api_base: Option<String>,
}

impl Default for GceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 3334,
                log_level: "info".to_string(),
                transport: "http".to_string(),
            },
            compute: ComputeConfig { api_base: None },
        }
    }
}

impl GceConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Override with environment variables
        if let Ok(port) = std::env::var("GCE_MCP_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| GceError::config_error("Invalid GCE_MCP_PORT"))?;
        }

        if let Ok(log_level) = std::env::var("GCE_MCP_LOG_LEVEL") {
            config.server.log_level = log_level;
        }

        if let Ok(transport) = std::env::var("GCE_MCP_TRANSPORT") {
            config.server.transport = transport;
        }

        if let Ok(base) = std::env::var("GCE_MCP_COMPUTE_API_BASE") {
            if !base.trim().is_empty() {
                config.compute.api_base = Some(base);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GceError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: GceConfig = toml::from_str(&content)
            .map_err(|e| GceError::config_error(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
