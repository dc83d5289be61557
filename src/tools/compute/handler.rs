use super::dto::{ListInstancesInput, ListInstancesOutput};
use super::implementation::ComputeTools;
use crate::error::Result;

pub async fn list_instances(
    tools: &ComputeTools,
    input: ListInstancesInput,
) -> Result<ListInstancesOutput> {
    tools.list_instances(input).await
}
