pub mod compute;

pub use compute::{list_instances, ComputeTools, ListInstancesInput, ListInstancesOutput};
