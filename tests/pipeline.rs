mod common;

use ai_release_notes::config::{NotesSource, Settings, TagSelection};
use ai_release_notes::git::GitRepository;
use ai_release_notes::ReleaseNotesError;
use pretty_assertions::assert_eq;

use common::{git, git_available, tagged_repo};

fn dry_run_settings(tag: TagSelection) -> Settings {
    Settings {
        tag,
        previous_tag: None,
        repo: "acme/widgets".parse().unwrap(),
        notes: NotesSource::Simple,
        title: None,
        draft: false,
        prerelease: None,
        output: None,
        publish: None,
    }
}

#[tokio::test]
async fn dry_run_builds_simple_notes_and_writes_output() {
    if !git_available() {
        return;
    }
    let dir = tagged_repo();
    let output = dir.path().join("NOTES.md");
    let settings = Settings {
        output: Some(output.clone()),
        ..dry_run_settings(TagSelection::Explicit("v1.1.0".to_string()))
    };

    let outcome = ai_release_notes::pipeline::run(settings, &GitRepository::new(dir.path()))
        .await
        .unwrap();

    let notes = outcome.notes.expect("range has commits");
    assert!(notes.starts_with("## What's Changed\n\n- fix: resolve memory leak ("));
    assert!(notes.contains("- feat: add authentication ("));
    assert_eq!(notes.lines().filter(|l| l.starts_with("- ")).count(), 2);
    assert_eq!(std::fs::read_to_string(output).unwrap(), notes);
    assert!(outcome.published.is_none());
}

#[tokio::test]
async fn latest_tag_is_detected() {
    if !git_available() {
        return;
    }
    let dir = tagged_repo();

    let outcome = ai_release_notes::pipeline::run(
        dry_run_settings(TagSelection::Latest),
        &GitRepository::new(dir.path()),
    )
    .await
    .unwrap();

    assert_eq!(outcome.tag, "v1.1.0");
}

#[tokio::test]
async fn empty_range_stops_without_notes() {
    if !git_available() {
        return;
    }
    let dir = tagged_repo();
    git(dir.path(), &["tag", "v1.2.0"]);

    let outcome = ai_release_notes::pipeline::run(
        dry_run_settings(TagSelection::Explicit("v1.2.0".to_string())),
        &GitRepository::new(dir.path()),
    )
    .await
    .unwrap();

    assert_eq!(outcome.notes, None);
}

#[tokio::test]
async fn missing_tag_fails_before_reading_history() {
    if !git_available() {
        return;
    }
    let dir = tagged_repo();

    let err = ai_release_notes::pipeline::run(
        dry_run_settings(TagSelection::Explicit("v0.0.1".to_string())),
        &GitRepository::new(dir.path()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReleaseNotesError::CommitLookup(_)));
    assert!(err.to_string().contains("v0.0.1"));
}

#[tokio::test]
async fn unknown_provider_fails_first() {
    let dir = tempfile::TempDir::new().unwrap();
    let settings = Settings {
        notes: NotesSource::Ai {
            provider: "anthropic".to_string(),
            config: ai_release_notes::ai::ProviderConfig::new("sk-test"),
        },
        ..dry_run_settings(TagSelection::Latest)
    };

    let err = ai_release_notes::pipeline::run(settings, &GitRepository::new(dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, ReleaseNotesError::UnsupportedProvider { .. }));
    assert!(err.to_string().contains("Supported providers: openai"));
}

#[tokio::test]
async fn explicit_tag_outside_a_repository_surfaces_the_git_error() {
    if !git_available() {
        return;
    }
    let dir = tempfile::TempDir::new().unwrap();

    let err = ai_release_notes::pipeline::run(
        dry_run_settings(TagSelection::Explicit("v1.0.0".to_string())),
        &GitRepository::new(dir.path()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReleaseNotesError::CommitLookup(_)));
    assert!(!err.to_string().contains("does not exist"));
    assert!(err.to_string().contains("git rev-parse"));
}
