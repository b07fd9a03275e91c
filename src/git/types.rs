use serde::{Deserialize, Serialize};

/// Length of the abbreviated hash shown in prompts and notes.
pub const SHORT_HASH_LEN: usize = 8;

/// A single commit as read from `git log`, newest-first in any sequence
/// produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub subject: String,
    pub body: String,
}

impl Commit {
    pub fn short_hash(&self) -> &str {
        self.hash.get(..SHORT_HASH_LEN).unwrap_or(&self.hash)
    }
}
