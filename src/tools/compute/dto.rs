use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ListInstancesInput {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub zone: String,
}

// Instance descriptors are passed through from the API verbatim.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListInstancesOutput {
    pub instances: Vec<serde_json::Value>,
}
