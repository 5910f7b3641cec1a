use crate::identity::{merge, IdentityFragment, IdentityMatcher, ResolvedIdentity};

/// Folds newly observed fragments into an already deduplicated list.
///
/// Each incoming fragment either merges into the first existing entry judged
/// similar (the existing entry keeps its fields on conflict) or is appended
/// as a new identity. With an empty `existing` list the incoming fragments
/// come back unchanged and in order.
///
/// Linear scan per fragment; fine at per-package maintainer counts.
pub fn fuse(
    matcher: &dyn IdentityMatcher,
    mut existing: Vec<ResolvedIdentity>,
    incoming: Vec<IdentityFragment>,
) -> Vec<ResolvedIdentity> {
    for fragment in incoming {
        let found = existing.iter().position(|identity| matcher.is_similar(identity, &fragment));
        match found {
            Some(index) => {
                let identity = std::mem::take(&mut existing[index]);
                existing[index] = merge(identity, fragment);
            }
            None => existing.push(fragment),
        }
    }
    existing
}

/// Tests

#[cfg(test)]
use crate::identity::ExactFieldMatcher;

#[cfg(test)]
fn fragment(handle: Option<&str>, name: Option<&str>, address: Option<&str>) -> IdentityFragment {
    IdentityFragment::new(
        handle.map(str::to_string),
        name.map(str::to_string),
        address.map(str::to_string),
    )
}

#[test]
fn empty_existing_passes_through_test() {
    let incoming = vec![
        IdentityFragment::with_handle("b"),
        IdentityFragment::with_handle("a"),
        IdentityFragment::with_handle("c"),
    ];
    let fused = fuse(&ExactFieldMatcher, Vec::new(), incoming.clone());
    assert_eq!(fused, incoming);
}

#[test]
fn merges_into_first_similar_test() {
    let existing = vec![fragment(Some("ana"), None, None)];
    let incoming = vec![fragment(Some("ana"), Some("Ana Lee"), None)];
    let fused = fuse(&ExactFieldMatcher, existing, incoming);
    assert_eq!(fused, vec![fragment(Some("ana"), Some("Ana Lee"), None)]);
}

#[test]
fn existing_wins_on_conflict_test() {
    let existing = vec![fragment(Some("ana"), Some("Ana"), None)];
    let incoming = vec![fragment(Some("ana"), Some("Ana Lee"), Some("ana@example.com"))];
    let fused = fuse(&ExactFieldMatcher, existing, incoming);
    assert_eq!(fused, vec![fragment(Some("ana"), Some("Ana"), Some("ana@example.com"))]);
}

#[test]
fn dissimilar_appended_in_order_test() {
    let existing = vec![fragment(Some("ana"), None, None)];
    let incoming = vec![fragment(Some("bob"), None, None), fragment(Some("carla"), None, None)];
    let fused = fuse(&ExactFieldMatcher, existing, incoming);
    assert_eq!(
        fused,
        vec![
            fragment(Some("ana"), None, None),
            fragment(Some("bob"), None, None),
            fragment(Some("carla"), None, None),
        ]
    );
}

#[test]
fn chained_merge_does_not_need_transitivity_test() {
    // The second incoming fragment only matches the entry after the first
    // merge filled in the display name. That is accumulation, not an
    // assumption of matcher transitivity.
    let existing = vec![fragment(Some("ana"), None, None)];
    let incoming = vec![
        fragment(Some("ana"), Some("Ana Lee"), None),
        fragment(None, Some("Ana Lee"), Some("ana@example.com")),
    ];
    let fused = fuse(&ExactFieldMatcher, existing, incoming);
    assert_eq!(fused, vec![fragment(Some("ana"), Some("Ana Lee"), Some("ana@example.com"))]);
}

#[test]
fn incoming_duplicates_collapse_test() {
    let incoming = vec![
        IdentityFragment::with_handle("u"),
        IdentityFragment::with_handle("u"),
    ];
    let fused = fuse(&ExactFieldMatcher, Vec::new(), incoming);
    assert_eq!(fused, vec![IdentityFragment::with_handle("u")]);
}
