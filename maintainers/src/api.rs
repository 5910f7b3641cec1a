use crate::identity::IdentityFragment;
use crate::selector::CommitActivity;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error: {0}")]
    Error(&'static str),
    // the only reason of `reqwest` dependency..
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One critical package as listed by the registry.
pub trait Package: Send + Sync {
    fn ecosystem(&self) -> &str;

    fn name(&self) -> &str;

    fn repository_url(&self) -> Option<&str>;

    /// Registry-declared maintainers; any identity field may be missing.
    fn maintainers(&self) -> Vec<IdentityFragment>;
}

/// Commit and issue history summary of one repository.
pub struct RepoActivity {
    /// Sorted by commit count in desc order; the selector relies on it.
    pub commit_activity: Vec<CommitActivity>,
    pub total_commits: u32,
    /// Authors of issues and pull requests. No count; every author listed
    /// by the source is a maintainer signal.
    pub issue_authors: Vec<IdentityFragment>,
}

#[async_trait]
pub trait Client: Send + Sync {
    type PKG: Package;

    /// One page of the critical package listing. An empty page ends the
    /// listing.
    async fn critical_packages(&self, page: u32, per_page: u32) -> Result<Vec<Self::PKG>>;

    async fn repo_activity(&self, repo_url: &str) -> Result<RepoActivity>;
}
