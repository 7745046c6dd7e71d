//! Category tag set shared by pins and boards.
//!
//! # Responsibility
//! - Hold free-text category labels with their original display casing.
//! - Enforce case-insensitive uniqueness on insert and removal.
//!
//! # Invariants
//! - No two entries are equal after lowercase folding.
//! - The first-seen casing of a tag is the one kept for display.
//! - Exact lookups (`contains_exact`) compare stored display values verbatim.

use serde::{Deserialize, Serialize};

/// Ordered set of category labels with case-insensitive identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    entries: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `tag` unless a case-insensitively equal entry already exists.
    ///
    /// Returns `true` when the set changed.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.position_folded(tag).is_some() {
            return false;
        }
        self.entries.push(tag.to_string());
        true
    }

    /// Removes the entry case-insensitively equal to `tag`.
    ///
    /// Returns `true` when the set changed. Absent tags are a no-op.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.position_folded(tag) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive membership.
    pub fn contains(&self, tag: &str) -> bool {
        self.position_folded(tag).is_some()
    }

    /// Exact, case-sensitive membership against stored display values.
    ///
    /// Category queries on boards and the catalog use this form.
    pub fn contains_exact(&self, tag: &str) -> bool {
        self.entries.iter().any(|entry| entry == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_folded(&self, tag: &str) -> Option<usize> {
        let key = fold(tag);
        self.entries.iter().position(|entry| fold(entry) == key)
    }
}

impl<S: AsRef<str>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for CategorySet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(value: CategorySet) -> Self {
        value.entries
    }
}

fn fold(tag: &str) -> String {
    tag.to_lowercase()
}
