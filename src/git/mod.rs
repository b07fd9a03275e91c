pub mod repository;
pub mod types;

pub use repository::{parse_log, CommitRange, GitRepository};
pub use types::Commit;
