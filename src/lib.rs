pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod server;
pub mod tools;

pub use config::GceConfig;
pub use error::{GceError, Result};
pub use server::GceServer;
