//! Catalog access point.
//!
//! # Responsibility
//! - Own the one decorated store chain the rest of the process talks to.
//! - Forward every store operation verbatim to the outermost layer.
//! - Offer convenience constructors and lookup-then-mutate helpers.
//!
//! # Invariants
//! - The instrumented chain is built as memory(timing(base)); the timing
//!   window sits strictly inside the memory window.
//! - Service helpers never reach around the store contract into boards they
//!   did not obtain from it.
//! - Construct once during process initialization and share by `Arc`.

use crate::hydrate::{BoardSource, HydrateResult};
use crate::instrument::{CallObserver, MemoryDecorator, MemoryProbe, TimingDecorator};
use crate::model::board::{Board, BoardId, BoardRef};
use crate::model::pin::{Pin, PinId, UserId};
use crate::store::{CatalogError, CatalogResult, CatalogStore, InMemoryCatalog};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static PIN_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^P(\d+)$").expect("valid pin id regex"));

/// Production store chain: memory decorator around timing decorator around
/// the base store.
pub type InstrumentedCatalog = MemoryDecorator<TimingDecorator<InMemoryCatalog>>;

/// Raw field values for a board built by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    pub id: BoardId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    /// Tags applied with the usual case-fold dedup.
    pub categories: Vec<String>,
}

/// Raw field values for a pin built by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPin {
    pub id: PinId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub url: String,
    pub categories: Vec<String>,
}

/// Shared handle to the decorated catalog store.
pub struct CatalogService<S: CatalogStore> {
    store: S,
}

impl CatalogService<InstrumentedCatalog> {
    /// Builds base store, then timing decorator, then memory decorator.
    pub fn instrumented() -> Self {
        Self::new(MemoryDecorator::new(TimingDecorator::new(
            InMemoryCatalog::new(),
        )))
    }

    /// Same chain as `instrumented`, with caller-provided probe and sink.
    pub fn instrumented_with(
        probe: Arc<dyn MemoryProbe>,
        observer: Arc<dyn CallObserver>,
    ) -> Self {
        let timed = TimingDecorator::with_observer(InMemoryCatalog::new(), Arc::clone(&observer));
        Self::new(MemoryDecorator::with_parts(timed, probe, observer))
    }
}

impl<S: CatalogStore> CatalogService<S> {
    /// Creates a service over an already composed store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_all_boards(&self) -> CatalogResult<Vec<BoardRef>> {
        self.store.get_all_boards()
    }

    pub fn add_board(&self, board: &BoardRef) -> CatalogResult<()> {
        self.store.add_board(board)
    }

    pub fn delete_board(&self, board: &BoardRef) -> CatalogResult<()> {
        self.store.delete_board(board)
    }

    pub fn get_all_pins(&self) -> CatalogResult<Vec<Pin>> {
        self.store.get_all_pins()
    }

    pub fn add_pin(&self, board: &BoardRef, pin: Pin) -> CatalogResult<()> {
        self.store.add_pin(board, pin)
    }

    pub fn delete_pin(&self, pin: &Pin) -> CatalogResult<()> {
        self.store.delete_pin(pin)
    }

    pub fn get_board_by_name(&self, name: &str) -> CatalogResult<Option<BoardRef>> {
        self.store.get_board_by_name(name)
    }

    pub fn get_boards_by_category(&self, category: &str) -> CatalogResult<Vec<BoardRef>> {
        self.store.get_boards_by_category(category)
    }

    pub fn get_pin_by_name(&self, name: &str) -> CatalogResult<Option<Pin>> {
        self.store.get_pin_by_name(name)
    }

    pub fn get_pins_by_category(&self, category: &str) -> CatalogResult<Vec<Pin>> {
        self.store.get_pins_by_category(category)
    }

    /// Builds a board from raw values and adds it to the catalog.
    pub fn create_board(&self, request: &NewBoard) -> CatalogResult<BoardRef> {
        let board = Board::new_ref(
            request.id,
            request.user_id.clone(),
            request.name.clone(),
            request.description.clone(),
        );
        for category in &request.categories {
            board.add_category_board(category)?;
        }
        self.store.add_board(&board)?;
        Ok(board)
    }

    /// Builds a pin from raw values and adds it to `board`.
    ///
    /// # Contract
    /// - Same membership guard as `add_pin`: a board outside the catalog is
    ///   left untouched.
    /// - Returns the constructed pin either way.
    pub fn create_pin(&self, board: &BoardRef, request: &NewPin) -> CatalogResult<Pin> {
        let mut pin = Pin::new(
            request.id.clone(),
            request.user_id.clone(),
            request.name.clone(),
            request.description.clone(),
            request.url.clone(),
        );
        for category in &request.categories {
            pin.add_category(category);
        }
        self.store.add_pin(board, pin.clone())?;
        Ok(pin)
    }

    /// First board whose id equals `id`.
    pub fn find_board_by_id(&self, id: BoardId) -> CatalogResult<Option<BoardRef>> {
        Ok(self
            .store
            .get_all_boards()?
            .into_iter()
            .find(|board| board.id() == id))
    }

    /// First pin, in catalog order, whose id equals `id`.
    pub fn find_pin_by_id(&self, id: &str) -> CatalogResult<Option<Pin>> {
        Ok(self
            .store
            .get_all_pins()?
            .into_iter()
            .find(|pin| pin.id() == id))
    }

    /// Deletes every board whose id equals `id`; returns how many were removed.
    ///
    /// Board ids are not unique by construction, so all matches go.
    pub fn delete_board_by_id(&self, id: BoardId) -> CatalogResult<usize> {
        let mut removed = 0;
        for board in self.store.get_all_boards()? {
            if board.id() == id {
                self.store.delete_board(&board)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Deletes the first pin whose id equals `id`; returns whether one existed.
    pub fn delete_pin_by_id(&self, id: &str) -> CatalogResult<bool> {
        match self.find_pin_by_id(id)? {
            Some(pin) => {
                self.store.delete_pin(&pin)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Highest board id plus one, or `1` for an empty catalog.
    ///
    /// Fails with `IdSpaceExhausted` when the highest id is `i64::MAX`.
    pub fn next_board_id(&self) -> CatalogResult<BoardId> {
        match self
            .store
            .get_all_boards()?
            .iter()
            .map(|board| board.id())
            .max()
        {
            Some(max) => max
                .checked_add(1)
                .ok_or(CatalogError::IdSpaceExhausted("board")),
            None => Ok(1),
        }
    }

    /// Successor of the highest `P###` pin id, zero-padded to three digits.
    ///
    /// Pin ids outside that shape are ignored. Returns `P001` when none match.
    /// Suffixes too large for `u64` are ignored too; a `u64::MAX` suffix
    /// fails with `IdSpaceExhausted`.
    pub fn next_pin_id(&self) -> CatalogResult<PinId> {
        let next = match self
            .store
            .get_all_pins()?
            .iter()
            .filter_map(|pin| PIN_ID_RE.captures(pin.id()))
            .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()))
            .max()
        {
            Some(max) => max
                .checked_add(1)
                .ok_or(CatalogError::IdSpaceExhausted("pin"))?,
            None => 1,
        };
        Ok(format!("P{next:03}"))
    }

    /// Loads every board from `source` and adds it through the store chain.
    ///
    /// Returns the number of boards loaded.
    pub fn hydrate<B: BoardSource + ?Sized>(&self, source: &B) -> HydrateResult<usize> {
        let records = source.load_all_boards()?;
        let count = records.len();
        for record in records {
            let board: BoardRef = Arc::new(Board::from_record(record));
            self.store.add_board(&board)?;
        }
        info!(
            "event=catalog_hydrate module=service status=ok boards={}",
            count
        );
        Ok(count)
    }
}
