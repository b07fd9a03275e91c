//! The generate-and-publish run: tag → commits → notes → release.

use tracing::debug;

use crate::ai::create_generator;
use crate::config::{NotesSource, Settings, TagSelection};
use crate::error::{ReleaseNotesError, Result};
use crate::git::GitRepository;
use crate::github::{GitHubClient, PublishAction, Published, ReleaseDescriptor, ReleasePublisher};
use crate::notes::{assemble, simple_notes};

const RULE_WIDTH: usize = 80;

/// What a run produced. `notes` is `None` when the range held no commits;
/// `published` is `None` for dry runs and empty ranges.
#[derive(Debug)]
pub struct Outcome {
    pub tag: String,
    pub notes: Option<String>,
    pub published: Option<Published>,
}

pub async fn run(settings: Settings, git: &GitRepository) -> Result<Outcome> {
    println!("🚀 Starting AI Release Notes Generator...\n");

    // Unknown providers fail before any git or network work.
    let generator = match settings.notes {
        NotesSource::Ai { provider, config } => Some(create_generator(&provider, config)?),
        NotesSource::Simple => None,
    };

    let tag = match settings.tag {
        TagSelection::Explicit(tag) => {
            if !git.tag_exists(&tag).await? {
                return Err(ReleaseNotesError::CommitLookup(format!(
                    "Failed to get git commits: tag '{}' does not exist in {}",
                    tag,
                    git.workdir().display()
                )));
            }
            tag
        }
        TagSelection::Latest => {
            let tag = git.latest_tag().await?;
            println!("🔍 Auto-detected latest tag: {}\n", tag);
            tag
        }
    };

    println!("📝 Fetching commits for tag: {}...", tag);
    let range = git
        .resolve_commits(&tag, settings.previous_tag.as_deref())
        .await?;
    match &range.previous_tag {
        Some(previous) => println!("   Comparing {} → {}", previous, tag),
        None => println!("   Getting all commits up to {}", tag),
    }

    let commits = range.commits;
    if commits.is_empty() {
        println!("⚠️  No commits found since last tag");
        return Ok(Outcome {
            tag,
            notes: None,
            published: None,
        });
    }
    println!("   Found {} commits\n", commits.len());

    let notes = match &generator {
        Some(generator) => {
            println!("🤖 Generating release notes with {}...", generator.name());
            assemble(&commits, generator.as_ref()).await?
        }
        None => {
            println!("📋 Listing commit subjects (AI disabled)...");
            simple_notes(&commits)
        }
    };

    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("Generated Release Notes:");
    println!("{}", rule);
    println!("{}", notes);
    println!("{}\n", rule);

    if let Some(path) = &settings.output {
        tokio::fs::write(path, &notes).await?;
        println!("💾 Release notes written to {}", path.display());
    }

    let Some(target) = settings.publish else {
        println!("✅ Dry run complete - no release created");
        return Ok(Outcome {
            tag,
            notes: Some(notes),
            published: None,
        });
    };

    println!("📦 Publishing GitHub release to {}...", settings.repo);
    let client = GitHubClient::new(target.token, target.api_url.as_deref())?;
    let publisher = ReleasePublisher::new(client);

    let descriptor = ReleaseDescriptor {
        title: settings.title,
        draft: settings.draft,
        prerelease: settings.prerelease,
        ..ReleaseDescriptor::new(settings.repo, tag.clone(), notes.clone())
    };
    debug!(prerelease = descriptor.is_prerelease(), draft = descriptor.draft, "release flags");

    let published = publisher.publish(&descriptor).await?;
    match published.action {
        PublishAction::Created => println!("✅ Release created successfully!"),
        PublishAction::Updated => println!("✅ Release updated successfully!"),
    }
    println!("   {}", published.release.html_url);

    Ok(Outcome {
        tag,
        notes: Some(notes),
        published: Some(published),
    })
}
