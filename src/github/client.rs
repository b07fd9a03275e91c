use async_trait::async_trait;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::types::{Release, ReleaseDraft, RepoSlug};
use crate::error::{ReleaseNotesError, Result};

pub const DEFAULT_PAGE_SIZE: u8 = 30;
pub const MAX_PAGE_SIZE: u8 = 100;

/// Release endpoints of a hosting platform.
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// `Ok(None)` when no release exists for `tag`.
    async fn get_release(&self, repo: &RepoSlug, tag: &str) -> Result<Option<Release>>;

    async fn create_release(&self, repo: &RepoSlug, draft: &ReleaseDraft) -> Result<Release>;

    async fn update_release(&self, repo: &RepoSlug, id: u64, draft: &ReleaseDraft) -> Result<Release>;

    async fn list_releases(&self, repo: &RepoSlug, per_page: u8) -> Result<Vec<Release>>;
}

pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    pub fn new(token: SecretString, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.expose_secret().to_string());
        if let Some(api_url) = api_url {
            builder = builder
                .base_uri(api_url)
                .map_err(|e| ReleaseNotesError::Validation(format!("Invalid GitHub API URL '{}': {}", api_url, e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| ReleaseNotesError::Publish(format!("Failed to create GitHub client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReleaseApi for GitHubClient {
    async fn get_release(&self, repo: &RepoSlug, tag: &str) -> Result<Option<Release>> {
        debug!(%repo, tag, "fetching release by tag");
        let result = self
            .client
            .repos(&repo.owner, &repo.name)
            .releases()
            .get_by_tag(tag)
            .await;

        match result {
            Ok(release) => Ok(Some(release.into())),
            Err(octocrab::Error::GitHub { source, .. }) if source.message.contains("Not Found") => Ok(None),
            Err(e) => Err(ReleaseNotesError::Publish(format!(
                "Failed to get GitHub release: {}",
                e
            ))),
        }
    }

    async fn create_release(&self, repo: &RepoSlug, draft: &ReleaseDraft) -> Result<Release> {
        debug!(%repo, tag = %draft.tag_name, "creating release");
        let release = self
            .client
            .repos(&repo.owner, &repo.name)
            .releases()
            .create(&draft.tag_name)
            .name(&draft.name)
            .body(&draft.body)
            .draft(draft.draft)
            .prerelease(draft.prerelease)
            .send()
            .await
            .map_err(|e| ReleaseNotesError::Publish(format!("Failed to create GitHub release: {}", e)))?;

        Ok(release.into())
    }

    async fn update_release(&self, repo: &RepoSlug, id: u64, draft: &ReleaseDraft) -> Result<Release> {
        debug!(%repo, id, tag = %draft.tag_name, "updating release");
        let release = self
            .client
            .repos(&repo.owner, &repo.name)
            .releases()
            .update(id)
            .tag_name(&draft.tag_name)
            .name(&draft.name)
            .body(&draft.body)
            .draft(draft.draft)
            .prerelease(draft.prerelease)
            .send()
            .await
            .map_err(|e| ReleaseNotesError::Publish(format!("Failed to update GitHub release: {}", e)))?;

        Ok(release.into())
    }

    async fn list_releases(&self, repo: &RepoSlug, per_page: u8) -> Result<Vec<Release>> {
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        debug!(%repo, per_page, "listing releases");
        let page = self
            .client
            .repos(&repo.owner, &repo.name)
            .releases()
            .list()
            .per_page(per_page)
            .send()
            .await
            .map_err(|e| ReleaseNotesError::Publish(format!("Failed to list GitHub releases: {}", e)))?;

        Ok(page.items.into_iter().map(Release::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server) -> GitHubClient {
        GitHubClient::new(SecretString::from("test-token".to_string()), Some(server.url().as_str())).unwrap()
    }

    fn repo() -> RepoSlug {
        "acme/widgets".parse().unwrap()
    }

    #[tokio::test]
    async fn missing_release_is_none() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/widgets/releases/tags/v1.0.0")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "message": "Not Found",
                    "documentation_url": "https://docs.github.com/rest/releases/releases#get-a-release-by-tag-name"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let release = client(&server).get_release(&repo(), "v1.0.0").await.unwrap();

        assert!(release.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn other_failures_are_publish_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/widgets/releases/tags/v1.0.0")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "message": "Bad credentials",
                    "documentation_url": "https://docs.github.com/rest"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server).get_release(&repo(), "v1.0.0").await.unwrap_err();

        assert!(matches!(err, ReleaseNotesError::Publish(_)));
        assert!(err.to_string().starts_with("Failed to get GitHub release"));
    }

    #[tokio::test]
    async fn lists_with_requested_page_size() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/widgets/releases")
            .match_query(Matcher::UrlEncoded("per_page".into(), "5".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let releases = client(&server).list_releases(&repo(), 5).await.unwrap();

        assert!(releases.is_empty());
        mock.assert_async().await;
    }
}
