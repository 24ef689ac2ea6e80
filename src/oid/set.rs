use super::Oid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::btree_set;

/// Ordered, duplicate-free set of OIDs (a `gss_OID_set`).
///
/// A single `Oid` converts into a one-element set, which is how attribute
/// predicates accept either one attribute or several.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OidSet(BTreeSet<Oid>);

impl OidSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the OID was not already present.
    pub fn insert(&mut self, oid: Oid) -> bool {
        self.0.insert(oid)
    }

    pub fn contains(&self, oid: &Oid) -> bool {
        self.0.contains(oid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Oid> {
        self.0.iter()
    }

    pub fn is_superset(&self, other: &OidSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn is_disjoint(&self, other: &OidSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Every OID of either set.
    pub fn union(&self, other: &OidSet) -> OidSet {
        self.0.union(&other.0).cloned().collect()
    }
}

impl From<Oid> for OidSet {
    fn from(oid: Oid) -> Self {
        OidSet(BTreeSet::from([oid]))
    }
}

impl From<&Oid> for OidSet {
    fn from(oid: &Oid) -> Self {
        OidSet::from(oid.clone())
    }
}

impl From<Vec<Oid>> for OidSet {
    fn from(oids: Vec<Oid>) -> Self {
        oids.into_iter().collect()
    }
}

impl<const N: usize> From<[Oid; N]> for OidSet {
    fn from(oids: [Oid; N]) -> Self {
        oids.into_iter().collect()
    }
}

impl From<BTreeSet<Oid>> for OidSet {
    fn from(oids: BTreeSet<Oid>) -> Self {
        OidSet(oids)
    }
}

/// `None` is the absent parameter: an empty set.
impl<T: Into<OidSet>> From<Option<T>> for OidSet {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl FromIterator<Oid> for OidSet {
    fn from_iter<I: IntoIterator<Item = Oid>>(iter: I) -> Self {
        OidSet(iter.into_iter().collect())
    }
}

impl Extend<Oid> for OidSet {
    fn extend<I: IntoIterator<Item = Oid>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for OidSet {
    type Item = Oid;
    type IntoIter = btree_set::IntoIter<Oid>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OidSet {
    type Item = &'a Oid;
    type IntoIter = btree_set::Iter<'a, Oid>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
