use crate::identity::{merge, IdentityMatcher, ResolvedIdentity};

/// Count of critical packages attributed to each resolved identity across
/// the whole corpus.
///
/// Entries are scanned linearly on every insert, so total aggregation cost
/// grows with corpus size times distinct maintainer count. Acceptable for
/// thousands of packages and low tens of thousands of maintainers; not
/// meant for more.
#[derive(Debug, Default)]
pub struct GlobalMaintainerIndex {
    entries: Vec<(ResolvedIdentity, u32)>,
}

impl GlobalMaintainerIndex {
    /// Attributes one critical package to `identity`.
    ///
    /// A similar key is replaced by the merge of the two, with the new
    /// observation acting as primary. Note this is the opposite tie-break
    /// to the per-package fuse, where the stored entry wins; both
    /// directions are load-bearing for the report and must not be unified.
    pub fn record(&mut self, matcher: &dyn IdentityMatcher, identity: ResolvedIdentity) {
        let similar = self.entries.iter().position(|(key, _)| matcher.is_similar(key, &identity));
        if let Some(index) = similar {
            let (key, count) = self.entries.remove(index);
            self.entries.push((merge(identity, key), count + 1));
            return;
        }
        // All-empty identities are never similar to anything, including
        // themselves; exact equality still collapses them into one entry.
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == identity) {
            entry.1 += 1;
            return;
        }
        self.entries.push((identity, 1));
    }

    /// Attributes one critical package to every maintainer in its set.
    pub fn record_package(&mut self, matcher: &dyn IdentityMatcher, maintainers: Vec<ResolvedIdentity>) {
        for identity in maintainers {
            self.record(matcher, identity);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResolvedIdentity, u32)> {
        self.entries.iter().map(|(identity, count)| (identity, *count))
    }

    /// Consumes the index into entries sorted by descending package count.
    /// Ties keep insertion order.
    pub fn into_ranked(self) -> Vec<(ResolvedIdentity, u32)> {
        let mut entries = self.entries;
        entries.sort_by(|(_, a), (_, b)| b.cmp(a));
        entries
    }
}

/// Folds every package's maintainer set into one index.
pub fn aggregate(
    matcher: &dyn IdentityMatcher,
    package_maintainers: impl IntoIterator<Item = Vec<ResolvedIdentity>>,
) -> GlobalMaintainerIndex {
    let mut index = GlobalMaintainerIndex::default();
    for maintainers in package_maintainers {
        index.record_package(matcher, maintainers);
    }
    index
}

/// Tests

#[cfg(test)]
use crate::identity::{ExactFieldMatcher, IdentityFragment};

#[cfg(test)]
fn fragment(handle: Option<&str>, name: Option<&str>, address: Option<&str>) -> IdentityFragment {
    IdentityFragment::new(
        handle.map(str::to_string),
        name.map(str::to_string),
        address.map(str::to_string),
    )
}

#[test]
fn same_handle_counted_once_test() {
    let packages = vec![
        vec![IdentityFragment::with_handle("ana")],
        vec![IdentityFragment::with_handle("ana")],
    ];
    let index = aggregate(&ExactFieldMatcher, packages);
    let entries = index.into_ranked();
    assert_eq!(entries, vec![(IdentityFragment::with_handle("ana"), 2)]);
}

#[test]
fn similar_keys_merge_fields_test() {
    let packages = vec![
        vec![fragment(None, Some("Ana Lee"), None)],
        vec![fragment(Some("ana"), Some("Ana Lee"), None)],
    ];
    let index = aggregate(&ExactFieldMatcher, packages);
    let entries = index.into_ranked();
    assert_eq!(entries, vec![(fragment(Some("ana"), Some("Ana Lee"), None), 2)]);
}

#[test]
fn new_observation_is_primary_test() {
    // Same display name, different handles: the later observation's handle
    // must win, unlike the per-package fuse.
    let packages = vec![
        vec![fragment(Some("ana_old"), Some("Ana Lee"), None)],
        vec![fragment(Some("ana"), Some("Ana Lee"), None)],
    ];
    let index = aggregate(&ExactFieldMatcher, packages);
    let entries = index.into_ranked();
    assert_eq!(entries, vec![(fragment(Some("ana"), Some("Ana Lee"), None), 2)]);
}

#[test]
fn dissimilar_keys_stay_apart_test() {
    let packages = vec![
        vec![IdentityFragment::with_handle("ana"), IdentityFragment::with_handle("bob")],
        vec![IdentityFragment::with_handle("bob")],
    ];
    let index = aggregate(&ExactFieldMatcher, packages);
    let entries = index.into_ranked();
    assert_eq!(
        entries,
        vec![
            (IdentityFragment::with_handle("bob"), 2),
            (IdentityFragment::with_handle("ana"), 1),
        ]
    );
}

#[test]
fn all_empty_identity_counts_by_exact_equality_test() {
    let packages = vec![vec![IdentityFragment::default()], vec![IdentityFragment::default()]];
    let index = aggregate(&ExactFieldMatcher, packages);
    assert_eq!(index.len(), 1);
    let (identity, count) = index.iter().next().unwrap();
    assert!(identity.is_empty());
    assert_eq!(count, 2);
}

#[test]
fn ranked_by_descending_count_test() {
    let packages = vec![
        vec![IdentityFragment::with_handle("ana"), IdentityFragment::with_handle("bob")],
        vec![IdentityFragment::with_handle("bob")],
        vec![IdentityFragment::with_handle("bob"), IdentityFragment::with_handle("carla")],
    ];
    let index = aggregate(&ExactFieldMatcher, packages);
    let counts: Vec<u32> = index.into_ranked().into_iter().map(|(_, count)| count).collect();
    assert_eq!(counts, vec![3, 1, 1]);
}
