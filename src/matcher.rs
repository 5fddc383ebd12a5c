//! Resource matching over listed remote records.
//!
//! Every reconciler resolves "the same" resource by natural key against a
//! freshly listed collection. Matching is case-sensitive exact equality.
//! The remote does not prevent duplicate names; when duplicates exist the
//! first record in list order wins, and that rule is stable.

use crate::types::{Role, Service, Tenant, User};

/// Find the first record satisfying a predicate. Tolerates empty slices.
pub fn first_match<T, P>(records: &[T], predicate: P) -> Option<&T>
where
    P: FnMut(&&T) -> bool,
{
    records.iter().find(predicate)
}

/// Access to a record's natural-key name.
pub trait Named {
    /// The natural-key name of this record.
    fn name(&self) -> &str;
}

impl Named for Service {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Tenant {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for User {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Role {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Find the first record whose name equals `name` exactly.
///
/// Case and whitespace differences never match.
pub fn find_by_name<'a, T: Named>(records: &'a [T], name: &str) -> Option<&'a T> {
    first_match(records, |record| record.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TenantId;

    fn tenant(id: &str, name: &str) -> Tenant {
        Tenant {
            id: TenantId::new(id),
            name: name.to_string(),
            description: String::new(),
            enabled: true,
        }
    }

    #[test]
    fn test_find_by_name_exact() {
        let tenants = vec![tenant("t1", "foo"), tenant("t2", "bar")];

        assert_eq!(find_by_name(&tenants, "foo").unwrap().id.as_str(), "t1");
        assert!(find_by_name(&tenants, "baz").is_none());
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        let tenants = vec![tenant("t1", "foo")];

        assert!(find_by_name(&tenants, "Foo").is_none());
        assert!(find_by_name(&tenants, "FOO").is_none());
    }

    #[test]
    fn test_find_by_name_rejects_whitespace_variants() {
        let tenants = vec![tenant("t1", "foo")];

        assert!(find_by_name(&tenants, "foo ").is_none());
        assert!(find_by_name(&tenants, " foo").is_none());
    }

    #[test]
    fn test_empty_collection() {
        let tenants: Vec<Tenant> = vec![];
        assert!(find_by_name(&tenants, "foo").is_none());
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let tenants = vec![
            tenant("t1", "dup"),
            tenant("t2", "dup"),
            tenant("t3", "dup"),
        ];

        // Stable: always the earliest record in list order.
        for _ in 0..3 {
            assert_eq!(find_by_name(&tenants, "dup").unwrap().id.as_str(), "t1");
        }
    }
}
