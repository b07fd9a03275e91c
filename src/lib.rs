//! Draft release notes for a git tag with an LLM and publish them as a
//! GitHub release.

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod notes;
pub mod pipeline;

pub use error::{ReleaseNotesError, Result};
