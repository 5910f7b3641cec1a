use maintainers::identity::IdentityFragment;
use maintainers::selector::CommitActivity;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Package {
    pub ecosystem: String,
    pub name: String,
    pub repository_url: Option<String>,
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
}

#[derive(Deserialize, Debug)]
pub struct Maintainer {
    pub login: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<Maintainer> for IdentityFragment {
    fn from(maintainer: Maintainer) -> Self {
        IdentityFragment::new(
            filled(maintainer.login),
            filled(maintainer.name),
            filled(maintainer.email),
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct RepoActivitySummary {
    #[serde(default)]
    pub total_commits: u32,
    /// Sorted by `count` in desc order by the API.
    #[serde(default)]
    pub committers: Vec<Committer>,
    #[serde(default)]
    pub issue_authors: Vec<IssueAuthor>,
}

#[derive(Deserialize, Debug)]
pub struct Committer {
    pub login: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub count: u32,
}

impl From<Committer> for CommitActivity {
    fn from(committer: Committer) -> Self {
        let author = IdentityFragment::new(filled(committer.login), filled(committer.name), filled(committer.email));
        CommitActivity::new(author, committer.count)
    }
}

#[derive(Deserialize, Debug)]
pub struct IssueAuthor {
    pub login: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<IssueAuthor> for IdentityFragment {
    fn from(author: IssueAuthor) -> Self {
        IdentityFragment::new(filled(author.login), filled(author.name), filled(author.email))
    }
}

// The APIs serialize unknown fields as empty strings now and then; absent
// and empty must mean the same thing downstream.
fn filled(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_with_partial_maintainers() {
        let body = r#"{
            "ecosystem": "npm",
            "name": "left-pad",
            "repository_url": "https://github.com/acme/left-pad",
            "maintainers": [
                { "login": "ana", "name": null, "email": "" },
                { "login": null, "name": "Bob Ray", "email": "bob@example.com" }
            ]
        }"#;
        let package: Package = serde_json::from_str(body).unwrap();
        assert_eq!(package.ecosystem, "npm");
        let fragments: Vec<IdentityFragment> = package.maintainers.into_iter().map(IdentityFragment::from).collect();
        assert_eq!(fragments[0], IdentityFragment::with_handle("ana"));
        assert_eq!(
            fragments[1],
            IdentityFragment::new(None, Some("Bob Ray".to_string()), Some("bob@example.com".to_string()))
        );
    }

    #[test]
    fn package_without_maintainers_field() {
        let body = r#"{ "ecosystem": "cargo", "name": "serde", "repository_url": null }"#;
        let package: Package = serde_json::from_str(body).unwrap();
        assert!(package.maintainers.is_empty());
        assert!(package.repository_url.is_none());
    }

    #[test]
    fn activity_summary() {
        let body = r#"{
            "total_commits": 100,
            "committers": [
                { "login": "u", "name": "U", "email": "u@example.com", "count": 70 },
                { "login": null, "name": "V", "email": "", "count": 30 }
            ],
            "issue_authors": [ { "login": "u", "name": null, "email": null } ]
        }"#;
        let summary: RepoActivitySummary = serde_json::from_str(body).unwrap();
        assert_eq!(summary.total_commits, 100);
        let second = CommitActivity::from(summary.committers.into_iter().nth(1).unwrap());
        assert_eq!(second.commits, 30);
        assert_eq!(second.author, IdentityFragment::new(None, Some("V".to_string()), None));
    }

    #[test]
    fn empty_activity_summary() {
        let summary: RepoActivitySummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.total_commits, 0);
        assert!(summary.committers.is_empty());
        assert!(summary.issue_authors.is_empty());
    }
}
