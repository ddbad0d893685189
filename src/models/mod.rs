pub mod issue;
pub mod board;
pub mod repository;
pub mod report;

pub use issue::*;
pub use board::*;
pub use repository::*;
pub use report::*;
