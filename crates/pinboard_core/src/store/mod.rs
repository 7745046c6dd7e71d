//! Catalog store contract and the in-memory base implementation.
//!
//! # Responsibility
//! - Define the operation set every catalog store (base or decorator) offers.
//! - Provide the base store holding the process-wide board list.
//!
//! # Invariants
//! - Absence never raises: lookups return `None` or an empty collection and
//!   deletes of absent entities are no-ops.
//! - Board membership is decided by handle identity, not by board id.
//! - The only failure a base store produces is `CatalogError::LockPoisoned`.

use crate::model::board::BoardRef;
use crate::model::pin::Pin;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod memory;

pub use memory::InMemoryCatalog;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure raised by catalog stores and board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A writer panicked while holding the named lock.
    LockPoisoned(&'static str),
    /// The highest id of the named kind has no successor.
    IdSpaceExhausted(&'static str),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LockPoisoned(what) => write!(f, "catalog lock poisoned: {what}"),
            Self::IdSpaceExhausted(kind) => {
                write!(f, "no {kind} id left after the current maximum")
            }
        }
    }
}

impl Error for CatalogError {}

/// Store contract shared by the base catalog and every decorator.
///
/// Implementations must be safe to share across threads; the access point
/// holds exactly one chain behind an `Arc`.
pub trait CatalogStore: Send + Sync {
    fn get_all_boards(&self) -> CatalogResult<Vec<BoardRef>>;
    /// Appends `board` unless the same handle is already present.
    fn add_board(&self, board: &BoardRef) -> CatalogResult<()>;
    /// Removes `board` by handle identity; absent is a no-op.
    fn delete_board(&self, board: &BoardRef) -> CatalogResult<()>;
    /// Every pin, board order outer and pin order inner.
    fn get_all_pins(&self) -> CatalogResult<Vec<Pin>>;
    /// Adds `pin` to `board` only when `board` belongs to this catalog.
    fn add_pin(&self, board: &BoardRef, pin: Pin) -> CatalogResult<()>;
    /// Deletes `pin` from the first board holding a structurally equal pin.
    fn delete_pin(&self, pin: &Pin) -> CatalogResult<()>;
    fn get_board_by_name(&self, name: &str) -> CatalogResult<Option<BoardRef>>;
    fn get_boards_by_category(&self, category: &str) -> CatalogResult<Vec<BoardRef>>;
    fn get_pin_by_name(&self, name: &str) -> CatalogResult<Option<Pin>>;
    fn get_pins_by_category(&self, category: &str) -> CatalogResult<Vec<Pin>>;
}

pub(crate) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    what: &'static str,
) -> CatalogResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| CatalogError::LockPoisoned(what))
}

pub(crate) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    what: &'static str,
) -> CatalogResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| CatalogError::LockPoisoned(what))
}
