use tracing::info;

use super::client::{ReleaseApi, DEFAULT_PAGE_SIZE};
use super::types::{Release, ReleaseDescriptor, ReleaseDraft, RepoSlug};
use crate::error::Result;

/// Whether [`ReleasePublisher::publish`] created a release or updated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub action: PublishAction,
    pub release: Release,
}

/// Create-or-update of the release for a tag. Each call performs exactly one
/// mutation and never retries.
pub struct ReleasePublisher<A> {
    api: A,
}

impl<A: ReleaseApi> ReleasePublisher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn publish(&self, descriptor: &ReleaseDescriptor) -> Result<Published> {
        let draft = ReleaseDraft::from(descriptor);

        match self.api.get_release(&descriptor.repo, &descriptor.tag).await? {
            Some(existing) => {
                info!(tag = %descriptor.tag, id = existing.id, "updating existing release");
                let release = self
                    .api
                    .update_release(&descriptor.repo, existing.id, &draft)
                    .await?;
                Ok(Published {
                    action: PublishAction::Updated,
                    release,
                })
            }
            None => {
                info!(tag = %descriptor.tag, "creating new release");
                let release = self.api.create_release(&descriptor.repo, &draft).await?;
                Ok(Published {
                    action: PublishAction::Created,
                    release,
                })
            }
        }
    }

    pub async fn release(&self, repo: &RepoSlug, tag: &str) -> Result<Option<Release>> {
        self.api.get_release(repo, tag).await
    }

    pub async fn releases(&self, repo: &RepoSlug, per_page: Option<u8>) -> Result<Vec<Release>> {
        self.api
            .list_releases(repo, per_page.unwrap_or(DEFAULT_PAGE_SIZE))
            .await
    }
}
