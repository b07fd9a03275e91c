#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn commit(dir: &Path, subject: &str, body: &[&str]) {
    let mut args = vec!["commit", "--quiet", "--allow-empty", "-m", subject];
    for paragraph in body {
        args.extend(["-m", paragraph]);
    }
    git(dir, &args);
}

/// A repository with three commits: `v1.0.0` on the first, `v1.1.0` on the
/// last.
pub fn tagged_repo() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path();

    git(path, &["init", "--quiet"]);
    commit(path, "chore: initial commit", &[]);
    git(path, &["tag", "v1.0.0"]);
    commit(path, "feat: add authentication", &["Supports OAuth2 | API tokens", "Second paragraph"]);
    commit(path, "fix: resolve memory leak", &[]);
    git(path, &["tag", "v1.1.0"]);

    dir
}
