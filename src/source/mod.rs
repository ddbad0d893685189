pub mod provider;
pub mod snapshot;

pub use provider::{BoardSource, IssueSource};
pub use snapshot::Snapshot;
