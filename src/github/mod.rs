pub mod client;
pub mod issue;
pub mod paginator;

pub use client::GitHubClient;
pub use issue::GitHubIssue;
pub use paginator::Paginator;
