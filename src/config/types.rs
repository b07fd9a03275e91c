use serde::{Deserialize, Serialize};

/// Optional `.release-notes.toml` contents. Every key may be omitted; CLI
/// flags and environment variables take precedence over anything set here.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub ai: AiConfig,
    pub release: ReleaseConfig,
    pub github: GithubConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    pub draft: Option<bool>,
    /// Leave unset to detect prereleases from the tag name.
    pub prerelease: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// API root for GitHub Enterprise, e.g. `https://github.example.com/api/v3`.
    pub api_url: Option<String>,
}
