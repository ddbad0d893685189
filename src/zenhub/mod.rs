pub mod client;
pub mod board;

pub use client::ZenHubClient;
pub use board::ZenHubBoard;
