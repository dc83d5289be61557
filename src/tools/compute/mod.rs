pub mod dto;
pub mod handler;
pub mod helpers;
pub mod implementation;

pub use dto::{ListInstancesInput, ListInstancesOutput};
pub use handler::list_instances;
pub use implementation::ComputeTools;
