//! Next-record-identifier allocation over a project's existing record keys.

use serde::{Serialize, Serializer};
use std::fmt;

/// A data-access-group tag. Scoped record keys carry it as a `<tag>-` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupScope(String);

impl GroupScope {
    /// Build a scope from a group tag. An empty tag is no scope at all.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Option<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            None
        } else {
            Some(Self(tag))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An allocated record identifier: a bare number, or `<group>-<number>` when
/// the allocation was scoped to a data-access-group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordIdentifier {
    scope: Option<GroupScope>,
    number: u64,
}

impl RecordIdentifier {
    #[must_use]
    pub fn new(scope: Option<GroupScope>, number: u64) -> Self {
        Self { scope, number }
    }

    /// The numeric part, without any group prefix.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    #[must_use]
    pub fn scope(&self) -> Option<&GroupScope> {
        self.scope.as_ref()
    }
}

impl fmt::Display for RecordIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}-{}", scope, self.number),
            None => write!(f, "{}", self.number),
        }
    }
}

impl Serialize for RecordIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a record key as a non-negative whole number.
///
/// Strict by intent: only nonempty, all-ASCII-digit keys count. Signs,
/// whitespace, decimals, and values past `u64::MAX` yield `None`.
#[must_use]
pub fn record_number(key: &str) -> Option<u64> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Strip a group prefix from a record key.
///
/// Returns the remainder after `<scope>-` when the key carries exactly that
/// prefix, `None` otherwise.
#[must_use]
pub fn scoped_suffix<'a>(key: &'a str, scope: &GroupScope) -> Option<&'a str> {
    key.strip_prefix(scope.as_str())?.strip_prefix('-')
}

/// Compute the next available record identifier for a project.
///
/// With a scope, only keys prefixed `<scope>-` are considered and the prefix
/// is stripped before comparison. Keys that are not plain non-negative
/// integers after that are ignored. The result is one past the highest
/// surviving number, so an empty or entirely non-numeric set allocates `1`
/// (or `<scope>-1`).
///
/// This is a pure computation over a snapshot of keys. It reserves nothing,
/// so two callers racing over the same snapshot obtain the same identifier.
#[must_use]
pub fn allocate_next<I, S>(existing_keys: I, scope: Option<&GroupScope>) -> RecordIdentifier
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut max_number: u64 = 0;
    for key in existing_keys {
        let key = key.as_ref();
        let number = match scope {
            Some(scope) => scoped_suffix(key, scope).and_then(record_number),
            None => record_number(key),
        };
        if let Some(number) = number {
            max_number = max_number.max(number);
        }
    }
    RecordIdentifier::new(scope.cloned(), max_number.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_scope_rejects_empty_tag() {
        assert!(GroupScope::new("").is_none());
        assert_eq!(GroupScope::new("5").unwrap().as_str(), "5");
    }

    #[test]
    fn test_record_number_accepts_plain_digits() {
        assert_eq!(record_number("0"), Some(0));
        assert_eq!(record_number("42"), Some(42));
        assert_eq!(record_number("007"), Some(7));
    }

    #[test]
    fn test_record_number_rejects_everything_else() {
        assert_eq!(record_number(""), None);
        assert_eq!(record_number("abc"), None);
        assert_eq!(record_number("1.5"), None);
        assert_eq!(record_number("+7"), None);
        assert_eq!(record_number("-7"), None);
        assert_eq!(record_number(" 7"), None);
        assert_eq!(record_number("7 "), None);
        assert_eq!(record_number("1e3"), None);
        // One past u64::MAX overflows the numeric range.
        assert_eq!(record_number("18446744073709551616"), None);
    }

    #[test]
    fn test_scoped_suffix_requires_exact_prefix() {
        let scope = GroupScope::new("5").unwrap();
        assert_eq!(scoped_suffix("5-1", &scope), Some("1"));
        assert_eq!(scoped_suffix("5-", &scope), Some(""));
        assert_eq!(scoped_suffix("52-1", &scope), None);
        assert_eq!(scoped_suffix("9-1", &scope), None);
        assert_eq!(scoped_suffix("5", &scope), None);
    }

    #[test]
    fn test_allocate_next_is_max_plus_one() {
        let id = allocate_next(["3", "7", "10"], None);
        assert_eq!(id.number(), 11);
        assert_eq!(id.to_string(), "11");
    }

    #[test]
    fn test_allocate_next_ignores_invalid_keys() {
        let with_noise = allocate_next(["3", "7", "10", "abc", "1.5", ""], None);
        let without = allocate_next(["3", "7", "10"], None);
        assert_eq!(with_noise, without);
    }

    #[test]
    fn test_allocate_next_empty_set_starts_at_one() {
        let id = allocate_next(std::iter::empty::<&str>(), None);
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn test_allocate_next_scoped_empty_set() {
        let scope = GroupScope::new("5").unwrap();
        let id = allocate_next(std::iter::empty::<&str>(), Some(&scope));
        assert_eq!(id.to_string(), "5-1");
    }

    #[test]
    fn test_allocate_next_scoped_filters_and_reprefixes() {
        let scope = GroupScope::new("5").unwrap();
        let id = allocate_next(["5-1", "5-2", "9-1"], Some(&scope));
        assert_eq!(id.to_string(), "5-3");
        assert_eq!(id.number(), 3);
        assert_eq!(id.scope().map(GroupScope::as_str), Some("5"));
    }

    #[test]
    fn test_allocate_next_scoped_ignores_unscoped_and_lookalike_keys() {
        let scope = GroupScope::new("5").unwrap();
        // "52-9" shares leading characters with the scope but is another group.
        let id = allocate_next(["5-2", "52-9", "500", "5-x"], Some(&scope));
        assert_eq!(id.to_string(), "5-3");
    }

    #[test]
    fn test_allocate_next_is_deterministic() {
        let keys = ["12", "4", "nope", "9"];
        let first = allocate_next(keys, None);
        let second = allocate_next(keys, None);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "13");
    }

    #[test]
    fn test_allocate_next_saturates_at_numeric_range() {
        let max_key = u64::MAX.to_string();
        let id = allocate_next([max_key.as_str()], None);
        assert_eq!(id.number(), u64::MAX);
    }

    #[test]
    fn test_record_identifier_serializes_as_string() {
        let scope = GroupScope::new("5").unwrap();
        let id = RecordIdentifier::new(Some(scope), 3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"5-3\"");

        let bare = RecordIdentifier::new(None, 11);
        assert_eq!(serde_json::to_string(&bare).unwrap(), "\"11\"");
    }
}
