use super::dto::{ListInstancesInput, ListInstancesOutput};
use super::helpers::build_url;
use crate::config::ComputeConfig;
use crate::error::{GceError, Result};
use gcp_auth::TokenProvider;
use std::sync::Arc;
use std::time::Duration;
use urlencoding::encode;

const COMPUTE_V1_BASE: &str = "https://compute.googleapis.com/compute/v1";
const COMPUTE_SCOPES: &[&str] = &["https://www.googleapis.com/auth/compute.readonly"];
const MAX_RESULTS: u32 = 50;

#[derive(Clone)]
pub struct ComputeTools {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Arc<dyn TokenProvider>>,
}

impl ComputeTools {
    /// Resolves ambient application default credentials. Overridden endpoints
    /// (emulators, tests) are called anonymously.
    pub async fn connect(config: &ComputeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("gce-mcp/0.1.0")
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                reqwest::Client::new()
            });

        let (base_url, credentials) = match &config.api_base {
            Some(base) => (base.trim_end_matches('/').to_string(), None),
            None => {
                let provider = gcp_auth::provider().await.map_err(GceError::Credentials)?;
                (COMPUTE_V1_BASE.to_string(), Some(provider))
            }
        };

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    pub async fn list_instances(&self, input: ListInstancesInput) -> Result<ListInstancesOutput> {
        let project = encode(&input.project);
        let zone = encode(&input.zone);
        let url = build_url(
            &self.base_url,
            &["projects", &project, "zones", &zone, "instances"],
        );

        let mut req = self.http.get(&url).query(&[("maxResults", MAX_RESULTS)]);
        if let Some(credentials) = &self.credentials {
            let token = credentials
                .token(COMPUTE_SCOPES)
                .await
                .map_err(GceError::Credentials)?;
            req = req.bearer_auth(token.as_str());
        }

        let response = req
            .send()
            .await
            .map_err(GceError::Network)?
            .error_for_status()
            .map_err(GceError::Network)?
            .json::<serde_json::Value>()
            .await
            .map_err(GceError::Network)?;

        // A zone with no instances has no "items" key at all.
        let instances = response
            .get("items")
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(ListInstancesOutput { instances })
    }
}
