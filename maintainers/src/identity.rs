use derive_more::Constructor;
use std::fmt::Display;

/// One observation of a person's identity.
///
/// Any subset of fields may be absent; there is no stable identifier, so
/// fragments are only ever compared field by field. Empty strings are
/// treated as absent everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Constructor)]
pub struct IdentityFragment {
    pub handle: Option<String>,
    pub display_name: Option<String>,
    pub contact_address: Option<String>,
}

/// The canonical form of one or more fragments judged to denote the same
/// person. Merging produces the same shape, so the alias is honest.
pub type ResolvedIdentity = IdentityFragment;

impl IdentityFragment {
    pub fn with_handle<STR: Into<String>>(handle: STR) -> Self {
        IdentityFragment::new(Some(handle.into()), None, None)
    }

    pub fn is_empty(&self) -> bool {
        filled(&self.handle).is_none() && filled(&self.display_name).is_none() && filled(&self.contact_address).is_none()
    }
}

impl Display for IdentityFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (filled(&self.handle), filled(&self.display_name)) {
            (Some(handle), Some(name)) => write!(f, "{} ({})", handle, name)?,
            (Some(handle), None) => f.write_str(handle)?,
            (None, Some(name)) => f.write_str(name)?,
            (None, None) => match filled(&self.contact_address) {
                Some(address) => return f.write_str(address),
                None => return f.write_str("(unknown)"),
            },
        }
        if let Some(address) = filled(&self.contact_address) {
            write!(f, " <{}>", address)?;
        }
        Ok(())
    }
}

/// Decides whether two observations denote the same person.
///
/// Implementations are heuristics, not proofs of identity. They are not
/// required to be transitive and callers must not chain conclusions across
/// unrelated fragments.
pub trait IdentityMatcher: Send + Sync {
    fn is_similar(&self, a: &IdentityFragment, b: &IdentityFragment) -> bool;
}

/// OR of exact, case-sensitive equality over the fields both sides have.
///
/// A field missing on either side is simply not compared. Known failure
/// modes, accepted as a limitation: false merges (two people sharing a
/// display name) and false splits (one person with no shared field across
/// any two observations).
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactFieldMatcher;

impl IdentityMatcher for ExactFieldMatcher {
    fn is_similar(&self, a: &IdentityFragment, b: &IdentityFragment) -> bool {
        field_eq(&a.handle, &b.handle)
            || field_eq(&a.display_name, &b.display_name)
            || field_eq(&a.contact_address, &b.contact_address)
    }
}

fn field_eq(a: &Option<String>, b: &Option<String>) -> bool {
    match (filled(a), filled(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Fills `primary`'s gaps from `secondary`.
///
/// A field already present on `primary` never changes; the result is empty
/// in a field only if both inputs were.
pub fn merge(primary: ResolvedIdentity, secondary: IdentityFragment) -> ResolvedIdentity {
    ResolvedIdentity {
        handle: merge_field(primary.handle, secondary.handle),
        display_name: merge_field(primary.display_name, secondary.display_name),
        contact_address: merge_field(primary.contact_address, secondary.contact_address),
    }
}

fn merge_field(primary: Option<String>, secondary: Option<String>) -> Option<String> {
    primary
        .filter(|value| !value.is_empty())
        .or_else(|| secondary.filter(|value| !value.is_empty()))
}

/// Tests

#[cfg(test)]
fn fragment(handle: Option<&str>, name: Option<&str>, address: Option<&str>) -> IdentityFragment {
    IdentityFragment::new(
        handle.map(str::to_string),
        name.map(str::to_string),
        address.map(str::to_string),
    )
}

#[test]
fn similar_on_any_shared_field_test() {
    let matcher = ExactFieldMatcher;
    let a = fragment(Some("ana"), None, None);
    let b = fragment(Some("ana"), Some("Ana Lee"), None);
    let c = fragment(None, Some("Ana Lee"), Some("ana@example.com"));
    assert!(matcher.is_similar(&a, &b));
    assert!(matcher.is_similar(&b, &c));
}

#[test]
fn not_transitive_test() {
    // a~b via handle, b~c via name, but a and c share no field.
    let matcher = ExactFieldMatcher;
    let a = fragment(Some("ana"), None, None);
    let b = fragment(Some("ana"), Some("Ana Lee"), None);
    let c = fragment(None, Some("Ana Lee"), Some("ana@example.com"));
    assert!(matcher.is_similar(&a, &b));
    assert!(matcher.is_similar(&b, &c));
    assert!(!matcher.is_similar(&a, &c));
}

#[test]
fn missing_fields_never_match_test() {
    let matcher = ExactFieldMatcher;
    let a = fragment(Some("ana"), None, None);
    let b = fragment(None, Some("Ana Lee"), None);
    assert!(!matcher.is_similar(&a, &b));
    assert!(!matcher.is_similar(&a, &IdentityFragment::default()));
    assert!(!matcher.is_similar(&IdentityFragment::default(), &IdentityFragment::default()));
}

#[test]
fn empty_string_is_absent_test() {
    let matcher = ExactFieldMatcher;
    let a = fragment(Some(""), None, None);
    let b = fragment(Some(""), None, None);
    assert!(!matcher.is_similar(&a, &b));
    assert!(a.is_empty());
}

#[test]
fn case_sensitive_test() {
    let matcher = ExactFieldMatcher;
    let a = fragment(Some("Ana"), None, None);
    let b = fragment(Some("ana"), None, None);
    assert!(!matcher.is_similar(&a, &b));
}

#[test]
fn merge_primary_wins_test() {
    let primary = fragment(Some("ana"), None, Some("ana@example.com"));
    let secondary = fragment(Some("ana_lee"), Some("Ana Lee"), Some("lee@example.com"));
    let merged = merge(primary, secondary);
    assert_eq!(merged, fragment(Some("ana"), Some("Ana Lee"), Some("ana@example.com")));
}

#[test]
fn merge_keeps_every_filled_field_test() {
    let primary = fragment(Some("ana"), None, None);
    let secondary = fragment(None, Some("Ana Lee"), None);
    let merged = merge(primary, secondary);
    assert_eq!(merged, fragment(Some("ana"), Some("Ana Lee"), None));
}

#[test]
fn merge_empty_string_loses_test() {
    let primary = fragment(Some(""), None, None);
    let secondary = fragment(Some("ana"), None, None);
    let merged = merge(primary, secondary);
    assert_eq!(merged.handle.as_deref(), Some("ana"));
}

#[test]
fn display_test() {
    assert_eq!(
        format!("{}", fragment(Some("ana"), Some("Ana Lee"), Some("ana@example.com"))),
        "ana (Ana Lee) <ana@example.com>"
    );
    assert_eq!(format!("{}", fragment(None, Some("Ana Lee"), None)), "Ana Lee");
    assert_eq!(format!("{}", fragment(None, None, Some("ana@example.com"))), "ana@example.com");
    assert_eq!(format!("{}", IdentityFragment::default()), "(unknown)");
}
