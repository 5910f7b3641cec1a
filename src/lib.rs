mod args;

pub use args::Args;

use ecosystems_client::EcosystemsClientBuilder;
use maintainers::aggregate::GlobalMaintainerIndex;
use maintainers::api::Result;
use maintainers::census::MaintainerCensus;
use maintainers::identity::ExactFieldMatcher;

/// Fetches the critical package corpus and resolves its maintainer roster.
pub async fn find_critical_maintainers(args: Args) -> Result<GlobalMaintainerIndex> {
    let mut builder = EcosystemsClientBuilder::default()
        .with_registry_url(args.registry_url)
        .with_activity_url(args.activity_url);
    if let Some(token) = args.api_token {
        builder = builder.try_with_token(token)?;
    }
    let client = builder.build()?;

    let census = MaintainerCensus::new(client, ExactFieldMatcher, args.threshold);
    census.run(args.per_page, args.max_activity_req as usize).await
}
