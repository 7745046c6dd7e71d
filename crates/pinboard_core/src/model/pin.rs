//! Pin domain model.
//!
//! # Responsibility
//! - Define the single taggable content item held by boards.
//! - Own the pin's category tag set.
//!
//! # Invariants
//! - `id` is unique within the catalog and never reassigned.
//! - Content fields are fixed after construction; only tags mutate.
//! - Category tags are unique under case folding (see `CategorySet`).

use crate::model::category::CategorySet;
use serde::{Deserialize, Serialize};

/// Opaque pin identifier, e.g. `"P001"` for hydrated pins.
pub type PinId = String;

/// Opaque owning-user identifier.
pub type UserId = String;

/// A single content item owned by at most one board.
///
/// Equality is structural: two pins are equal when every field, including
/// the category set, is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    id: PinId,
    user_id: UserId,
    name: String,
    description: String,
    url: String,
    categories: CategorySet,
}

impl Pin {
    /// Creates a pin with an empty category set.
    pub fn new(
        id: impl Into<PinId>,
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: description.into(),
            url: url.into(),
            categories: CategorySet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Adds `category` unless a case-insensitively equal tag exists.
    pub fn add_category(&mut self, category: &str) -> bool {
        self.categories.insert(category)
    }

    /// Removes the tag case-insensitively equal to `category`, if any.
    pub fn remove_category(&mut self, category: &str) -> bool {
        self.categories.remove(category)
    }

    /// Builder form of `add_category` for constructing tagged pins.
    pub fn with_category(mut self, category: &str) -> Self {
        self.add_category(category);
        self
    }

    /// Exact-match tag check used by category queries.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains_exact(category)
    }
}
