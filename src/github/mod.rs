pub mod client;
pub mod publisher;
pub mod types;

pub use client::{GitHubClient, ReleaseApi, DEFAULT_PAGE_SIZE};
pub use publisher::{PublishAction, Published, ReleasePublisher};
pub use types::{is_prerelease_tag, Release, ReleaseDescriptor, ReleaseDraft, RepoSlug};
