pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod zenhub;
pub mod source;
pub mod analysis;
pub mod report;

pub use config::{Config, ReportConfig};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use zenhub::ZenHubClient;
pub use source::{BoardSource, IssueSource, Snapshot};
pub use analysis::{build_report, ReportPipeline};
