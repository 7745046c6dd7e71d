//! In-memory base catalog store.
//!
//! # Responsibility
//! - Hold the process-wide board list and answer cross-board queries.
//!
//! # Invariants
//! - Board order is insertion order.
//! - No board handle appears twice in the list.
//! - `get_pin_by_name` scans every board in order, not only the first one.
//! - Lock order is list, then board. `add_pin` holds the list read lock
//!   across the board write, so once `delete_board` returns no pin lands on
//!   the removed board.

use crate::model::board::BoardRef;
use crate::model::pin::Pin;
use crate::store::{read_lock, write_lock, CatalogResult, CatalogStore};
use std::sync::{Arc, RwLock};

const BOARDS_LOCK: &str = "catalog boards";

/// Base catalog store backed by a locked board list.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    boards: RwLock<Vec<BoardRef>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // Queries clone the handles out and release the list lock before touching
    // board locks.
    fn boards_snapshot(&self) -> CatalogResult<Vec<BoardRef>> {
        Ok(read_lock(&self.boards, BOARDS_LOCK)?.clone())
    }
}

impl CatalogStore for InMemoryCatalog {
    fn get_all_boards(&self) -> CatalogResult<Vec<BoardRef>> {
        self.boards_snapshot()
    }

    fn add_board(&self, board: &BoardRef) -> CatalogResult<()> {
        let mut boards = write_lock(&self.boards, BOARDS_LOCK)?;
        if !boards.iter().any(|member| Arc::ptr_eq(member, board)) {
            boards.push(Arc::clone(board));
        }
        Ok(())
    }

    fn delete_board(&self, board: &BoardRef) -> CatalogResult<()> {
        let mut boards = write_lock(&self.boards, BOARDS_LOCK)?;
        if let Some(index) = boards.iter().position(|member| Arc::ptr_eq(member, board)) {
            boards.remove(index);
        }
        Ok(())
    }

    fn get_all_pins(&self) -> CatalogResult<Vec<Pin>> {
        let mut pins = Vec::new();
        for board in self.boards_snapshot()? {
            pins.extend(board.get_all_pins()?);
        }
        Ok(pins)
    }

    fn add_pin(&self, board: &BoardRef, pin: Pin) -> CatalogResult<()> {
        let boards = read_lock(&self.boards, BOARDS_LOCK)?;
        if boards.iter().any(|member| Arc::ptr_eq(member, board)) {
            board.add_pin(pin)?;
        }
        Ok(())
    }

    fn delete_pin(&self, pin: &Pin) -> CatalogResult<()> {
        for board in self.boards_snapshot()? {
            if board.delete_pin(pin)? {
                break;
            }
        }
        Ok(())
    }

    fn get_board_by_name(&self, name: &str) -> CatalogResult<Option<BoardRef>> {
        Ok(read_lock(&self.boards, BOARDS_LOCK)?
            .iter()
            .find(|board| board.name() == name)
            .cloned())
    }

    fn get_boards_by_category(&self, category: &str) -> CatalogResult<Vec<BoardRef>> {
        let mut matching = Vec::new();
        for board in self.boards_snapshot()? {
            if board.has_category(category)? {
                matching.push(board);
            }
        }
        Ok(matching)
    }

    fn get_pin_by_name(&self, name: &str) -> CatalogResult<Option<Pin>> {
        for board in self.boards_snapshot()? {
            if let Some(pin) = board.get_pin_by_name(name)? {
                return Ok(Some(pin));
            }
        }
        Ok(None)
    }

    fn get_pins_by_category(&self, category: &str) -> CatalogResult<Vec<Pin>> {
        let mut pins = Vec::new();
        for board in self.boards_snapshot()? {
            pins.extend(board.get_pins_by_category(category)?);
        }
        Ok(pins)
    }
}
