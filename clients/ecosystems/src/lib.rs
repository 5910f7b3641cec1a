//! Client for ecosyste.ms-style registry and repository-activity APIs.
//!
//! Two base URLs: the registry host serves the paginated critical package
//! listing, the activity host serves one commit/issue summary per repository
//! URL. Both speak plain JSON over GET.

mod builder;
mod payload;

pub use builder::EcosystemsClientBuilder;

use async_trait::async_trait;
use derive_more::Constructor;
use log::debug;
use maintainers::api::{Client, Package, RepoActivity, Result};
use maintainers::identity::IdentityFragment;
use maintainers::selector::CommitActivity;
use reqwest::Response;
use serde::de::DeserializeOwned;

pub struct EcosystemsClient {
    client: reqwest::Client,
    registry_url: String,
    activity_url: String,
}

#[derive(Debug, Constructor)]
pub struct EcosystemsPackage {
    ecosystem: String,
    name: String,
    repository_url: Option<String>,
    maintainers: Vec<IdentityFragment>,
}

impl Package for EcosystemsPackage {
    fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    fn maintainers(&self) -> Vec<IdentityFragment> {
        self.maintainers.clone()
    }
}

impl From<payload::Package> for EcosystemsPackage {
    fn from(package: payload::Package) -> Self {
        let maintainers = package.maintainers.into_iter().map(IdentityFragment::from).collect();
        EcosystemsPackage::new(package.ecosystem, package.name, package.repository_url, maintainers)
    }
}

impl From<payload::RepoActivitySummary> for RepoActivity {
    fn from(summary: payload::RepoActivitySummary) -> Self {
        RepoActivity {
            commit_activity: summary.committers.into_iter().map(CommitActivity::from).collect(),
            total_commits: summary.total_commits,
            issue_authors: summary.issue_authors.into_iter().map(IdentityFragment::from).collect(),
        }
    }
}

#[async_trait]
impl Client for EcosystemsClient {
    type PKG = EcosystemsPackage;

    async fn critical_packages(&self, page: u32, per_page: u32) -> Result<Vec<EcosystemsPackage>> {
        let request_url = format!("{}/api/v1/packages/critical", self.registry_url);
        debug!("GET {} page={} per_page={}", request_url, page, per_page);
        let response = self
            .client
            .get(request_url)
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .send()
            .await?;
        let packages = read_response::<Vec<payload::Package>>(response).await?;
        Ok(packages.into_iter().map(EcosystemsPackage::from).collect())
    }

    async fn repo_activity(&self, repo_url: &str) -> Result<RepoActivity> {
        let request_url = format!("{}/api/v1/repositories/lookup", self.activity_url);
        debug!("GET {} url={}", request_url, repo_url);
        let response = self.client.get(request_url).query(&[("url", repo_url)]).send().await?;
        let summary = read_response::<payload::RepoActivitySummary>(response).await?;
        Ok(summary.into())
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = response.error_for_status()?;
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_conversion_normalizes_maintainers() {
        let package = payload::Package {
            ecosystem: "npm".to_string(),
            name: "left-pad".to_string(),
            repository_url: Some("https://github.com/acme/left-pad".to_string()),
            maintainers: vec![payload::Maintainer {
                login: Some("ana".to_string()),
                name: Some("".to_string()),
                email: None,
            }],
        };
        let package = EcosystemsPackage::from(package);
        assert_eq!(package.name(), "left-pad");
        assert_eq!(package.maintainers(), vec![IdentityFragment::with_handle("ana")]);
    }
}
