use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;
use tracing::{debug, warn};

use super::types::Commit;
use crate::error::{ReleaseNotesError, Result};

/// Separates the fields of one commit in the log output (ASCII unit separator).
pub const FIELD_SEPARATOR: char = '\u{1f}';
/// Terminates each commit in the log output (ASCII record separator).
pub const RECORD_SEPARATOR: char = '\u{1e}';

// hash, author, author date, subject, body
const LOG_FORMAT: &str = "--pretty=format:%H%x1f%an%x1f%ai%x1f%s%x1f%b%x1e";

/// Commits between two tags, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Exclusive lower boundary, `None` when the range reaches the root commit.
    pub previous_tag: Option<String>,
    pub commits: Vec<Commit>,
}

/// A local checkout queried through the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
}

impl GitRepository {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// List the commits reachable from `current_tag` but not from the
    /// previous tag. When `previous_tag` is not given the next older tag in
    /// version order is used; if there is none, every commit reachable from
    /// `current_tag` is returned.
    pub async fn resolve_commits(
        &self,
        current_tag: &str,
        previous_tag: Option<&str>,
    ) -> Result<CommitRange> {
        let previous_tag = match previous_tag {
            Some(tag) => Some(tag.to_string()),
            None => self.previous_tag(current_tag).await,
        };

        let range = match &previous_tag {
            Some(previous) => format!("{}..{}", previous, current_tag),
            None => current_tag.to_string(),
        };

        let output = self
            .git(&["log", LOG_FORMAT, "--end-of-options", &range, "--"])
            .await
            .map_err(|e| ReleaseNotesError::CommitLookup(format!("Failed to get git commits: {}", e)))?;

        Ok(CommitRange {
            previous_tag,
            commits: parse_log(&output),
        })
    }

    /// The tag immediately older than `current_tag` in descending version
    /// order. Any failure is logged and treated as "no previous tag".
    pub async fn previous_tag(&self, current_tag: &str) -> Option<String> {
        match self.git(&["tag", "--sort=-version:refname"]).await {
            Ok(listing) => tag_after(&listing, current_tag),
            Err(e) => {
                warn!("could not determine previous tag: {}", e);
                None
            }
        }
    }

    /// Most recent tag reachable from HEAD.
    pub async fn latest_tag(&self) -> Result<String> {
        let tag = self
            .git(&["describe", "--tags", "--abbrev=0"])
            .await
            .map_err(|e| ReleaseNotesError::CommitLookup(format!("Failed to detect latest tag: {}", e)))?;

        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ReleaseNotesError::CommitLookup(
                "Failed to detect latest tag: no tags found".to_string(),
            ));
        }
        Ok(tag.to_string())
    }

    /// Whether `tag` names a commit. A missing tag is `Ok(false)`; a git
    /// failure (no repository, git not installed) is an error.
    pub async fn tag_exists(&self, tag: &str) -> Result<bool> {
        let revision = format!("{}^{{commit}}", tag);
        let output = self
            .run_git(&["rev-parse", "--verify", "--quiet", "--end-of-options", &revision])
            .await?;

        if output.status.success() {
            return Ok(true);
        }
        // --quiet exits 1 without a message when the revision is unknown.
        if output.status.code() == Some(1) && output.stderr.trim_ascii().is_empty() {
            return Ok(false);
        }
        Err(failed("rev-parse", &output))
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = self.run_git(args).await?;
        if !output.status.success() {
            return Err(failed(args.first().copied().unwrap_or_default(), &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run_git(&self, args: &[&str]) -> Result<Output> {
        debug!(workdir = %self.workdir.display(), "git {}", args.join(" "));

        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| {
                ReleaseNotesError::CommitLookup(format!(
                    "failed to execute git, make sure it is installed and in PATH: {}",
                    e
                ))
            })
    }
}

fn failed(subcommand: &str, output: &Output) -> ReleaseNotesError {
    ReleaseNotesError::CommitLookup(format!(
        "`git {}` exited with {}: {}",
        subcommand,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    ))
}

/// Parse the output of `git log` run with the crate's log format.
///
/// Each record is split into at most five fields, so a body that itself
/// contains [`FIELD_SEPARATOR`] is kept intact. A body containing
/// [`RECORD_SEPARATOR`] would still be cut in two; git never emits that byte
/// for ordinary commit text.
pub fn parse_log(output: &str) -> Vec<Commit> {
    output
        .split(RECORD_SEPARATOR)
        .filter_map(parse_record)
        .collect()
}

fn parse_record(entry: &str) -> Option<Commit> {
    if entry.trim().is_empty() {
        return None;
    }

    let mut fields = entry.splitn(5, FIELD_SEPARATOR);
    let hash = fields.next()?.trim();
    if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let mut next_field = || fields.next().map(str::trim).unwrap_or_default().to_string();
    let author = next_field();
    let date = next_field();
    let subject = next_field();
    let body = next_field();

    Some(Commit {
        hash: hash.to_string(),
        author,
        date,
        subject,
        body,
    })
}

fn tag_after(listing: &str, current_tag: &str) -> Option<String> {
    let mut tags = listing.lines().map(str::trim).filter(|t| !t.is_empty());
    tags.position(|t| t == current_tag)?;
    tags.next().map(str::to_string)
}
