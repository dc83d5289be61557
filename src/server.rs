use serde_json::json;
use tokio::sync::OnceCell;

use crate::config::GceConfig;
use crate::error::Result;
use crate::mcp::dto::Tool;
use crate::tools::compute::ComputeTools;

pub struct GceServer {
    config: GceConfig,
    compute: OnceCell<ComputeTools>,
}

impl GceServer {
    pub fn new(config: GceConfig) -> Self {
        Self {
            config,
            compute: OnceCell::new(),
        }
    }

    /// Static tool catalog. Adding a tool means adding a descriptor here and
    /// a matching branch in the call handler.
    pub fn get_tools(&self) -> Vec<Tool> {
        vec![Tool {
            name: "list_instances".to_string(),
            description: "List Compute Engine instances in a project and zone".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "project": { "type": "string", "description": "Project id" },
                    "zone": { "type": "string", "description": "Zone name, e.g. us-central1-a" }
                },
                "required": ["project", "zone"]
            }),
        }]
    }

    /// Compute client, connected on first demand and reused for the rest of
    /// the process. A failed connection leaves the cell empty, so the next
    /// call retries.
    pub async fn compute(&self) -> Result<&ComputeTools> {
        self.compute
            .get_or_try_init(|| ComputeTools::connect(&self.config.compute))
            .await
    }
}
