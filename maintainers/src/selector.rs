use crate::identity::IdentityFragment;
use derive_more::Constructor;

/// One committer's entry in a repository's commit histogram.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct CommitActivity {
    pub author: IdentityFragment,
    pub commits: u32,
}

/// Returns the committers whose cumulative share of `total_commits` first
/// reaches `threshold`, scanning `entries` in the given order.
///
/// # Arguments
/// * `entries` - commit activity sorted by commit count in desc order
/// * `total_commits` - denominator of the cumulative share; `0` selects nobody
/// * `threshold` - share of total commits from range (0.0, 1.0]
///
/// The entry that crosses the threshold is included. If the threshold is
/// never reached (bot exclusions can shrink the denominator below the sum of
/// entries, or grow it above), every entry is included.
///
/// Entries must already be sorted; this function does not re-sort, and
/// selection over unsorted input is wrong without detection.
pub fn significant_committers(entries: Vec<CommitActivity>, total_commits: u32, threshold: f32) -> Vec<IdentityFragment> {
    debug_assert!(
        entries.windows(2).all(|pair| pair[0].commits >= pair[1].commits),
        "commit activity entries must be sorted by commit count in descending order"
    );
    if total_commits == 0 {
        return Vec::new();
    }
    let mut selected = Vec::new();
    let mut commits_so_far: u32 = 0;
    for entry in entries {
        commits_so_far += entry.commits;
        selected.push(entry.author);
        if commits_so_far as f32 / total_commits as f32 >= threshold {
            break;
        }
    }
    selected
}

/// Tests

#[cfg(test)]
fn entry(handle: &str, commits: u32) -> CommitActivity {
    CommitActivity::new(IdentityFragment::with_handle(handle), commits)
}

#[test]
fn stops_at_first_crossing_test() {
    let entries = vec![entry("x", 50), entry("y", 30), entry("z", 20)];
    let selected = significant_committers(entries, 100, 0.3);
    // 50/100 already reaches 0.3, so x alone suffices.
    assert_eq!(selected, vec![IdentityFragment::with_handle("x")]);
}

#[test]
fn crossing_entry_included_test() {
    let entries = vec![entry("x", 50), entry("y", 30), entry("z", 20)];
    let selected = significant_committers(entries, 100, 0.75);
    assert_eq!(
        selected,
        vec![IdentityFragment::with_handle("x"), IdentityFragment::with_handle("y")]
    );
}

#[test]
fn zero_total_commits_test() {
    let entries = vec![entry("x", 50), entry("y", 30)];
    assert_eq!(significant_committers(entries, 0, 0.3), Vec::new());
}

#[test]
fn threshold_never_reached_test() {
    // Denominator larger than the listed entries, e.g. after bot exclusions.
    let entries = vec![entry("x", 5), entry("y", 3), entry("z", 2)];
    let selected = significant_committers(entries, 1000, 0.75);
    assert_eq!(selected.len(), 3);
}

#[test]
fn no_entries_test() {
    assert_eq!(significant_committers(Vec::new(), 100, 0.3), Vec::new());
}

#[test]
fn exact_threshold_is_inclusive_test() {
    let entries = vec![entry("z", 40), entry("x", 30), entry("y", 30)];
    let selected = significant_committers(entries, 100, 0.4);
    assert_eq!(selected, vec![IdentityFragment::with_handle("z")]);
}
