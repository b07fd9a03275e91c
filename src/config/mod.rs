//! Run configuration.
//!
//! Values come from CLI flags (which already include their environment
//! fallbacks) and then from the optional TOML file. [`Settings::resolve`]
//! validates everything up front so the pipeline never starts with missing
//! input.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;

pub use types::{AiConfig, FileConfig, GithubConfig, ReleaseConfig};

use crate::ai::{ProviderConfig, DEFAULT_PROVIDER};
use crate::cli::{CommonArgs, GenerateArgs};
use crate::error::{ReleaseNotesError, Result};
use crate::github::RepoSlug;

pub const DEFAULT_CONFIG_FILE: &str = ".release-notes.toml";

impl FileConfig {
    /// Load `path`, or `.release-notes.toml` from the working directory when
    /// no path is given. Only an explicitly named file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_error = |reason: String| ReleaseNotesError::Config {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSelection {
    Explicit(String),
    Latest,
}

#[derive(Debug)]
pub enum NotesSource {
    Ai {
        provider: String,
        config: ProviderConfig,
    },
    /// Plain commit list, no backend.
    Simple,
}

/// Where to publish. Absent for dry runs.
#[derive(Debug)]
pub struct PublishTarget {
    pub token: SecretString,
    pub api_url: Option<String>,
}

#[derive(Debug)]
pub struct Settings {
    pub tag: TagSelection,
    pub previous_tag: Option<String>,
    pub repo: RepoSlug,
    pub notes: NotesSource,
    pub title: Option<String>,
    pub draft: bool,
    pub prerelease: Option<bool>,
    pub output: Option<PathBuf>,
    pub publish: Option<PublishTarget>,
}

impl Settings {
    pub fn resolve(common: &CommonArgs, args: &GenerateArgs, file: &FileConfig) -> Result<Self> {
        let repo = resolve_repo(common)?;

        let notes = if args.no_ai {
            NotesSource::Simple
        } else {
            let api_key = present(&args.api_key).ok_or_else(|| {
                ReleaseNotesError::Validation(
                    "API key must be provided via --api-key or OPENAI_API_KEY env var".to_string(),
                )
            })?;

            NotesSource::Ai {
                provider: present(&args.provider)
                    .or(file.ai.provider.as_deref())
                    .unwrap_or(DEFAULT_PROVIDER)
                    .to_string(),
                config: ProviderConfig {
                    api_key: SecretString::from(api_key.to_string()),
                    model: present(&args.model).or(file.ai.model.as_deref()).map(str::to_string),
                    base_url: present(&args.base_url)
                        .or(file.ai.base_url.as_deref())
                        .map(str::to_string),
                    temperature: file.ai.temperature,
                    max_tokens: file.ai.max_tokens,
                },
            }
        };

        let publish = if args.dry_run {
            None
        } else {
            Some(resolve_publish_target(common, file)?)
        };

        let tag = if args.latest {
            TagSelection::Latest
        } else if let Some(tag) = present(&args.tag) {
            TagSelection::Explicit(tag.to_string())
        } else {
            return Err(ReleaseNotesError::Validation(
                "Either --tag or --latest must be specified".to_string(),
            ));
        };

        Ok(Settings {
            tag,
            previous_tag: present(&args.previous_tag).map(str::to_string),
            repo,
            notes,
            title: present(&args.title).map(str::to_string),
            draft: args.draft || file.release.draft.unwrap_or(false),
            prerelease: args.prerelease.or(file.release.prerelease),
            output: args.output.clone(),
            publish,
        })
    }
}

/// Settings for the read-only `show` and `list` commands.
#[derive(Debug)]
pub struct RemoteSettings {
    pub repo: RepoSlug,
    pub target: PublishTarget,
}

impl RemoteSettings {
    pub fn resolve(common: &CommonArgs, file: &FileConfig) -> Result<Self> {
        Ok(RemoteSettings {
            repo: resolve_repo(common)?,
            target: resolve_publish_target(common, file)?,
        })
    }
}

fn resolve_repo(common: &CommonArgs) -> Result<RepoSlug> {
    present(&common.repo)
        .ok_or_else(|| {
            ReleaseNotesError::Validation(
                "Repository must be specified via --repo or GITHUB_REPOSITORY env var".to_string(),
            )
        })?
        .parse()
}

fn resolve_publish_target(common: &CommonArgs, file: &FileConfig) -> Result<PublishTarget> {
    let token = present(&common.github_token).ok_or_else(|| {
        ReleaseNotesError::Validation(
            "GitHub token must be provided via --github-token or GITHUB_TOKEN env var".to_string(),
        )
    })?;

    Ok(PublishTarget {
        token: SecretString::from(token.to_string()),
        api_url: file.github.api_url.clone(),
    })
}

// Empty environment variables count as unset.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
