use crate::aggregate::GlobalMaintainerIndex;
use crate::api::{Client, Package, Result};
use crate::fuse::fuse;
use crate::identity::{IdentityMatcher, ResolvedIdentity};
use crate::selector::significant_committers;
use futures::{stream, StreamExt, TryStreamExt};
use log::{debug, info};
use std::sync::Arc;

const FIRST_PAGE_NUMBER: u32 = 1;

/// Runs the whole census: page through the critical package listing, derive
/// each package's maintainer set from registry, commit and issue signals,
/// then fold every set into one [`GlobalMaintainerIndex`].
pub struct MaintainerCensus<CLIENT, MATCHER>
where
    CLIENT: 'static + Client,
    MATCHER: 'static + IdentityMatcher,
{
    client: Arc<CLIENT>,
    matcher: Arc<MATCHER>,
    threshold: f32,
}

impl<CLIENT, MATCHER> MaintainerCensus<CLIENT, MATCHER>
where
    CLIENT: 'static + Client,
    MATCHER: 'static + IdentityMatcher,
{
    pub fn new(client: CLIENT, matcher: MATCHER, threshold: f32) -> Self {
        MaintainerCensus {
            client: Arc::new(client),
            matcher: Arc::new(matcher),
            threshold,
        }
    }

    /// Any failed fetch aborts the run; there is no retry and no partial
    /// output. Activity lookups run up to `max_activity_requests` at a time,
    /// but `buffered` keeps them in listing order, so fusing and aggregation
    /// stay deterministic.
    pub async fn run(&self, per_page: u32, max_activity_requests: usize) -> Result<GlobalMaintainerIndex> {
        let packages = self.critical_packages(per_page).await?;
        info!("Found {} critical packages", packages.len());

        let maintainer_sets: Vec<Vec<ResolvedIdentity>> = stream::iter(packages)
            .map(|package| {
                let client = Arc::clone(&self.client);
                let matcher = Arc::clone(&self.matcher);
                let threshold = self.threshold;
                async move { Self::package_maintainers(client, matcher, threshold, package).await }
            })
            .buffered(max_activity_requests)
            .try_collect()
            .await?;

        let mut index = GlobalMaintainerIndex::default();
        for maintainers in maintainer_sets {
            index.record_package(self.matcher.as_ref(), maintainers);
        }
        info!("Found {} distinct maintainers", index.len());
        Ok(index)
    }

    async fn critical_packages(&self, per_page: u32) -> Result<Vec<CLIENT::PKG>> {
        let mut packages = Vec::new();
        let mut page = FIRST_PAGE_NUMBER;
        loop {
            let page_packages = self.client.critical_packages(page, per_page).await?;
            debug!("+{}", page_packages.len());
            if page_packages.is_empty() {
                break;
            }
            packages.extend(page_packages);
            page += 1;
        }
        Ok(packages)
    }

    /// Builds one package's maintainer set. Registry-declared maintainers
    /// seed the list, so they win field conflicts in every later merge.
    async fn package_maintainers(
        client: Arc<CLIENT>,
        matcher: Arc<MATCHER>,
        threshold: f32,
        package: CLIENT::PKG,
    ) -> Result<Vec<ResolvedIdentity>> {
        let maintainers: Vec<ResolvedIdentity> = package.maintainers();

        let repo_url = match package.repository_url() {
            Some(url) => url.to_string(),
            None => {
                debug!("{}/{} has no repository URL", package.ecosystem(), package.name());
                return Ok(maintainers);
            }
        };
        let activity = client.repo_activity(&repo_url).await?;

        let committers = significant_committers(activity.commit_activity, activity.total_commits, threshold);
        let maintainers = fuse(matcher.as_ref(), maintainers, committers);
        let maintainers = fuse(matcher.as_ref(), maintainers, activity.issue_authors);
        Ok(maintainers)
    }
}
