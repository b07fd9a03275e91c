use tracing::debug;

use super::prompt::format_prompt;
use crate::ai::TextGenerator;
use crate::error::Result;
use crate::git::Commit;

/// Notes used whenever the range holds no commits.
pub const EMPTY_NOTES: &str = "## What's Changed\n\nNo changes in this release.";

/// Generate release notes for `commits` (newest first) with `generator` and
/// append the changelog footer. An empty range short-circuits to
/// [`EMPTY_NOTES`] without calling the backend.
pub async fn assemble<G>(commits: &[Commit], generator: &G) -> Result<String>
where
    G: TextGenerator + ?Sized,
{
    if commits.is_empty() {
        return Ok(EMPTY_NOTES.to_string());
    }

    let prompt = format_prompt(commits);
    debug!(
        backend = generator.name(),
        commits = commits.len(),
        "generating release notes"
    );
    let notes = generator.generate_text(&prompt).await?;

    Ok(format!("{}{}", notes, changelog_footer(commits)))
}

/// `**Full Changelog**` footer spanning the oldest (last) to the newest
/// (first) commit.
pub fn changelog_footer(commits: &[Commit]) -> String {
    match (commits.last(), commits.first()) {
        (Some(oldest), Some(newest)) => format!(
            "\n\n---\n\n**Full Changelog**: {} commit(s) from {} to {}",
            commits.len(),
            oldest.short_hash(),
            newest.short_hash()
        ),
        _ => String::new(),
    }
}

/// Plain bullet list of commit subjects, for runs without a backend.
pub fn simple_notes(commits: &[Commit]) -> String {
    if commits.is_empty() {
        return EMPTY_NOTES.to_string();
    }

    let mut notes = String::from("## What's Changed\n\n");
    for commit in commits {
        notes.push_str(&format!("- {} ({})\n", commit.subject, commit.short_hash()));
    }
    notes
}
