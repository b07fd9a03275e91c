use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use octocrab::models;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ReleaseNotesError;

static PRERELEASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-(alpha|beta|rc|pre)").expect("valid prerelease pattern"));

/// Whether a tag name marks a prerelease, e.g. `v1.0.0-beta.1` or `2.0.0-rc1`.
pub fn is_prerelease_tag(tag: &str) -> bool {
    PRERELEASE_TAG.is_match(tag)
}

/// Repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = ReleaseNotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(RepoSlug {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ReleaseNotesError::Validation(format!(
                "Repository must be in the format owner/repo, got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What to publish for a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub repo: RepoSlug,
    pub tag: String,
    /// Release title; the tag is used when unset.
    pub title: Option<String>,
    pub body: String,
    pub draft: bool,
    /// Explicit prerelease flag; detected from the tag when unset.
    pub prerelease: Option<bool>,
}

impl ReleaseDescriptor {
    pub fn new(repo: RepoSlug, tag: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            repo,
            tag: tag.into(),
            title: None,
            body: body.into(),
            draft: false,
            prerelease: None,
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.tag)
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.unwrap_or_else(|| is_prerelease_tag(&self.tag))
    }
}

/// Fields sent when creating or updating a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseDraft {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl From<&ReleaseDescriptor> for ReleaseDraft {
    fn from(descriptor: &ReleaseDescriptor) -> Self {
        ReleaseDraft {
            tag_name: descriptor.tag.clone(),
            name: descriptor.title().to_string(),
            body: descriptor.body.clone(),
            draft: descriptor.draft,
            prerelease: descriptor.is_prerelease(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<models::repos::Release> for Release {
    fn from(release: models::repos::Release) -> Self {
        Release {
            id: release.id.into_inner(),
            tag_name: release.tag_name,
            name: release.name,
            body: release.body,
            draft: release.draft,
            prerelease: release.prerelease,
            html_url: release.html_url.to_string(),
            created_at: release.created_at,
            published_at: release.published_at,
        }
    }
}
