use thiserror::Error;

pub type Result<T> = std::result::Result<T, GceError>;

#[derive(Error, Debug)]
pub enum GceError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    InvalidParams(String),

    #[error("Credential error: {0}")]
    Credentials(#[from] gcp_auth::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GceError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        GceError::InvalidParams(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        GceError::Config(msg.into())
    }

    /// JSON-RPC error code for this failure. Upstream and client-construction
    /// failures all collapse to -32000; callers never see a finer
    /// classification.
    pub fn rpc_code(&self) -> i32 {
        match self {
            GceError::UnknownTool(_) => -32601,
            GceError::InvalidParams(_) => -32602,
            _ => -32000,
        }
    }
}
