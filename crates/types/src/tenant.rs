//! Tenant identifiers and registry snapshots

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identifier of a registered tenant (a site in the multisite network).
///
/// Zero is never a valid tenant; parsing rejects it so that an id is always
/// "present" in the sense used by orphan classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(u64);

impl TenantId {
    /// Create a tenant id, returning `None` for zero
    #[must_use]
    pub fn new(id: u64) -> Option<Self> {
        (id != 0).then_some(Self(id))
    }

    /// Raw numeric value
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Parse a purely ASCII-numeric segment (no sign, no whitespace).
    ///
    /// Returns `None` for empty input, any non-digit character, overflow or zero.
    #[must_use]
    pub fn parse_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse::<u64>().ok().and_then(Self::new)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_segment(s).ok_or_else(|| format!("not a tenant id: {s}"))
    }
}

/// Snapshot of the tenant registry, read once per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSet {
    ids: BTreeSet<TenantId>,
}

impl TenantSet {
    /// Whether the id belongs to a registered tenant
    #[must_use]
    pub fn contains(&self, id: TenantId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of registered tenants
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the snapshot is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = TenantId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<TenantId> for TenantSet {
    fn from_iter<I: IntoIterator<Item = TenantId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_tenant() {
        assert!(TenantId::new(0).is_none());
        assert!(TenantId::parse_segment("0").is_none());
        assert!(TenantId::parse_segment("000").is_none());
    }

    #[test]
    fn test_parse_segment_rejects_non_digits() {
        assert!(TenantId::parse_segment("").is_none());
        assert!(TenantId::parse_segment("+5").is_none());
        assert!(TenantId::parse_segment("5a").is_none());
        assert!(TenantId::parse_segment(" 5").is_none());
        assert!(TenantId::parse_segment("99999999999999999999999").is_none());
        assert_eq!(TenantId::parse_segment("042").map(TenantId::get), Some(42));
    }

    #[test]
    fn test_tenant_set_membership() {
        let set: TenantSet = [1, 2, 3].into_iter().filter_map(TenantId::new).collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(TenantId::new(2).unwrap()));
        assert!(!set.contains(TenantId::new(9).unwrap()));
    }
}
