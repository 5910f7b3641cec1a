use critical_maintainers::find_critical_maintainers;
use critical_maintainers::Args;
use maintainers::identity::IdentityFragment;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PER_PAGE: u32 = 100;

fn args(server: &MockServer, threshold: f32) -> Args {
    Args {
        registry_url: server.uri(),
        activity_url: server.uri(),
        api_token: None,
        threshold,
        per_page: PER_PAGE,
        max_activity_req: 4,
    }
}

fn fragment(handle: Option<&str>, name: Option<&str>, address: Option<&str>) -> IdentityFragment {
    IdentityFragment::new(
        handle.map(str::to_string),
        name.map(str::to_string),
        address.map(str::to_string),
    )
}

async fn mock_listing_page(server: &MockServer, page: u32, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v1/packages/critical"))
        .and(query_param("page", format!("{}", page)))
        .and(query_param("per_page", format!("{}", PER_PAGE)))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"))
        .mount(server)
        .await;
}

async fn mock_activity(server: &MockServer, repo_url: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/lookup"))
        .and(query_param("url", repo_url))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn happy_path_merges_across_packages() {
    let server = MockServer::start().await;

    let listing = r#"[
        {
            "ecosystem": "npm",
            "name": "left-pad",
            "repository_url": "https://github.com/acme/left-pad",
            "maintainers": [ { "login": "ana", "name": "Ana Lee", "email": null } ]
        },
        {
            "ecosystem": "cargo",
            "name": "anafmt",
            "repository_url": null,
            "maintainers": [ { "login": null, "name": "Ana Lee", "email": "ana@example.com" } ]
        }
    ]"#;
    mock_listing_page(&server, 1, listing).await;
    mock_listing_page(&server, 2, "[]").await;

    let activity = r#"{
        "total_commits": 100,
        "committers": [
            { "login": "bob", "name": null, "email": null, "count": 70 },
            { "login": "carl", "name": null, "email": null, "count": 30 }
        ],
        "issue_authors": [ { "login": "bob", "name": "Bob Ray", "email": null } ]
    }"#;
    mock_activity(&server, "https://github.com/acme/left-pad", activity).await;

    let index = find_critical_maintainers(args(&server, 0.3)).await.unwrap();
    let entries = index.into_ranked();

    // The second package's observation of Ana acts as primary in the
    // cross-package merge, so her contact address joins the entry.
    assert_eq!(
        entries,
        vec![
            (fragment(Some("ana"), Some("Ana Lee"), Some("ana@example.com")), 2),
            // bob crossed the 0.3 commit share alone; his issue-author
            // fragment deduplicated into the same entry and filled the name.
            (fragment(Some("bob"), Some("Bob Ray"), None), 1),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn commit_and_issue_signals_deduplicate() {
    let server = MockServer::start().await;

    let listing = r#"[
        {
            "ecosystem": "npm",
            "name": "tiny",
            "repository_url": "https://github.com/acme/tiny",
            "maintainers": []
        }
    ]"#;
    mock_listing_page(&server, 1, listing).await;
    mock_listing_page(&server, 2, "[]").await;

    let activity = r#"{
        "total_commits": 100,
        "committers": [
            { "login": "u", "name": null, "email": null, "count": 70 },
            { "login": "v", "name": null, "email": null, "count": 30 }
        ],
        "issue_authors": [ { "login": "u", "name": null, "email": null } ]
    }"#;
    mock_activity(&server, "https://github.com/acme/tiny", activity).await;

    let index = find_critical_maintainers(args(&server, 0.3)).await.unwrap();
    let entries = index.into_ranked();

    // v never crossed the threshold; u appears once despite two signals.
    assert_eq!(entries, vec![(IdentityFragment::with_handle("u"), 1)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn empty_listing_yields_empty_index() {
    let server = MockServer::start().await;
    mock_listing_page(&server, 1, "[]").await;

    let index = find_critical_maintainers(args(&server, 0.75)).await.unwrap();
    assert!(index.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_activity_fetch_aborts_run() {
    let server = MockServer::start().await;

    let listing = r#"[
        {
            "ecosystem": "npm",
            "name": "flaky",
            "repository_url": "https://github.com/acme/flaky",
            "maintainers": [ { "login": "ana", "name": null, "email": null } ]
        }
    ]"#;
    mock_listing_page(&server, 1, listing).await;
    mock_listing_page(&server, 2, "[]").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/lookup"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = find_critical_maintainers(args(&server, 0.75)).await;
    assert!(result.is_err(), "a failed activity fetch must be fatal, got partial output");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn zero_total_commits_keeps_registry_maintainers_only() {
    let server = MockServer::start().await;

    let listing = r#"[
        {
            "ecosystem": "pypi",
            "name": "fresh",
            "repository_url": "https://github.com/acme/fresh",
            "maintainers": [ { "login": "ana", "name": null, "email": null } ]
        }
    ]"#;
    mock_listing_page(&server, 1, listing).await;
    mock_listing_page(&server, 2, "[]").await;

    // Committers listed but a zero denominator: nobody is significant.
    let activity = r#"{
        "total_commits": 0,
        "committers": [ { "login": "bob", "name": null, "email": null, "count": 5 } ],
        "issue_authors": []
    }"#;
    mock_activity(&server, "https://github.com/acme/fresh", activity).await;

    let index = find_critical_maintainers(args(&server, 0.75)).await.unwrap();
    let entries = index.into_ranked();
    assert_eq!(entries, vec![(IdentityFragment::with_handle("ana"), 1)]);
}
