use std::collections::BTreeMap;

use serde::Serialize;

/// Mapping from a 1-based locus ordinal to its cleaned locus name.
///
/// The ordinal doubles as the line number of the locus tree in the
/// multi-tree file, so it is the join key between the log and the trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocusIndexMap(BTreeMap<usize, String>);

impl LocusIndexMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a locus, returning the name previously stored under `index`.
    pub fn insert(&mut self, index: usize, name: impl Into<String>) -> Option<String> {
        self.0.insert(index, name.into())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(index, name)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(index, name)| (*index, name.as_str()))
    }
}

impl FromIterator<(usize, String)> for LocusIndexMap {
    fn from_iter<T: IntoIterator<Item = (usize, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
