//! Board domain model.
//!
//! # Responsibility
//! - Own an ordered pin sequence and a category tag set.
//! - Offer the only mutation paths for that sequence and set.
//!
//! # Invariants
//! - A board exclusively owns its pins; callers receive snapshots.
//! - Pin sequence and tag set each sit behind their own lock.
//! - Board identity is the shared handle (`BoardRef`), not `id`.

use crate::model::category::CategorySet;
use crate::model::pin::{Pin, UserId};
use crate::store::{read_lock, write_lock, CatalogResult};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Integer board identifier.
pub type BoardId = i64;

/// Shared board handle. Catalog membership compares handles with
/// `Arc::ptr_eq`.
pub type BoardRef = Arc<Board>;

/// Plain snapshot of a board, used for hydration and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub id: BoardId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Ordered, owned collection of pins plus its own category tags.
#[derive(Debug)]
pub struct Board {
    id: BoardId,
    user_id: UserId,
    name: String,
    description: String,
    pins: RwLock<Vec<Pin>>,
    categories: RwLock<CategorySet>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(
        id: BoardId,
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            name: name.into(),
            description: description.into(),
            pins: RwLock::new(Vec::new()),
            categories: RwLock::new(CategorySet::new()),
        }
    }

    /// Creates an empty board wrapped in a shared handle.
    pub fn new_ref(
        id: BoardId,
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> BoardRef {
        Arc::new(Self::new(id, user_id, name, description))
    }

    /// Builds a board from a snapshot, applying category dedup rules.
    pub fn from_record(record: BoardRecord) -> Self {
        let categories = record.categories.iter().collect::<CategorySet>();
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            description: record.description,
            pins: RwLock::new(record.pins),
            categories: RwLock::new(categories),
        }
    }

    /// Captures the current state as a plain record.
    pub fn to_record(&self) -> CatalogResult<BoardRecord> {
        Ok(BoardRecord {
            id: self.id,
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            pins: self.get_all_pins()?,
            categories: self.categories()?.into(),
        })
    }

    pub fn id(&self) -> BoardId {
        self.id
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

    /// Appends `pin`. No duplicate check is performed.
    pub fn add_pin(&self, pin: Pin) -> CatalogResult<()> {
        write_lock(&self.pins, "board pins")?.push(pin);
        Ok(())
    }

    /// Removes the first structurally equal pin.
    ///
    /// Returns whether a pin was removed; absent pins are a no-op.
    pub fn delete_pin(&self, pin: &Pin) -> CatalogResult<bool> {
        let mut pins = write_lock(&self.pins, "board pins")?;
        match pins.iter().position(|candidate| candidate == pin) {
            Some(index) => {
                pins.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Snapshot of every pin in insertion order.
    pub fn get_all_pins(&self) -> CatalogResult<Vec<Pin>> {
        Ok(read_lock(&self.pins, "board pins")?.clone())
    }

    pub fn contains_pin(&self, pin: &Pin) -> CatalogResult<bool> {
        Ok(read_lock(&self.pins, "board pins")?.contains(pin))
    }

    /// First pin whose name equals `name` exactly.
    pub fn get_pin_by_name(&self, name: &str) -> CatalogResult<Option<Pin>> {
        Ok(read_lock(&self.pins, "board pins")?
            .iter()
            .find(|pin| pin.name() == name)
            .cloned())
    }

    /// Pins carrying `category` as an exact (case-sensitive) stored tag.
    pub fn get_pins_by_category(&self, category: &str) -> CatalogResult<Vec<Pin>> {
        Ok(read_lock(&self.pins, "board pins")?
            .iter()
            .filter(|pin| pin.has_category(category))
            .cloned()
            .collect())
    }

    /// Adds a board tag unless a case-insensitively equal tag exists.
    pub fn add_category_board(&self, category: &str) -> CatalogResult<bool> {
        Ok(write_lock(&self.categories, "board categories")?.insert(category))
    }

    /// Removes the board tag case-insensitively equal to `category`.
    pub fn remove_category_board(&self, category: &str) -> CatalogResult<bool> {
        Ok(write_lock(&self.categories, "board categories")?.remove(category))
    }

    pub fn categories(&self) -> CatalogResult<CategorySet> {
        Ok(read_lock(&self.categories, "board categories")?.clone())
    }

    /// Exact-match board tag check used by catalog category queries.
    pub fn has_category(&self, category: &str) -> CatalogResult<bool> {
        Ok(read_lock(&self.categories, "board categories")?.contains_exact(category))
    }
}
