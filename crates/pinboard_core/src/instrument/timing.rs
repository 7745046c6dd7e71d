//! Wall-clock timing decorator.

use crate::instrument::{default_observer, CallObserver, Metric, Observation};
use crate::model::board::BoardRef;
use crate::model::pin::Pin;
use crate::store::{CatalogResult, CatalogStore};
use std::sync::Arc;
use std::time::Instant;

/// Records the elapsed time of every call forwarded to `inner`.
pub struct TimingDecorator<S: CatalogStore> {
    inner: S,
    observer: Arc<dyn CallObserver>,
}

impl<S: CatalogStore> TimingDecorator<S> {
    /// Wraps `inner`, logging observations through `LogObserver`.
    pub fn new(inner: S) -> Self {
        Self::with_observer(inner, default_observer())
    }

    pub fn with_observer(inner: S, observer: Arc<dyn CallObserver>) -> Self {
        Self { inner, observer }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn measure<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&S) -> CatalogResult<T>,
    ) -> CatalogResult<T> {
        let started_at = Instant::now();
        let result = call(&self.inner)?;
        self.observer.observe(&Observation {
            operation,
            metric: Metric::Elapsed(started_at.elapsed()),
        });
        Ok(result)
    }
}

impl<S: CatalogStore> CatalogStore for TimingDecorator<S> {
    fn get_all_boards(&self) -> CatalogResult<Vec<BoardRef>> {
        self.measure("get_all_boards", |inner| inner.get_all_boards())
    }

    fn add_board(&self, board: &BoardRef) -> CatalogResult<()> {
        self.measure("add_board", |inner| inner.add_board(board))
    }

    fn delete_board(&self, board: &BoardRef) -> CatalogResult<()> {
        self.measure("delete_board", |inner| inner.delete_board(board))
    }

    fn get_all_pins(&self) -> CatalogResult<Vec<Pin>> {
        self.measure("get_all_pins", |inner| inner.get_all_pins())
    }

    fn add_pin(&self, board: &BoardRef, pin: Pin) -> CatalogResult<()> {
        self.measure("add_pin", |inner| inner.add_pin(board, pin))
    }

    fn delete_pin(&self, pin: &Pin) -> CatalogResult<()> {
        self.measure("delete_pin", |inner| inner.delete_pin(pin))
    }

    fn get_board_by_name(&self, name: &str) -> CatalogResult<Option<BoardRef>> {
        self.measure("get_board_by_name", |inner| inner.get_board_by_name(name))
    }

    fn get_boards_by_category(&self, category: &str) -> CatalogResult<Vec<BoardRef>> {
        self.measure("get_boards_by_category", |inner| {
            inner.get_boards_by_category(category)
        })
    }

    fn get_pin_by_name(&self, name: &str) -> CatalogResult<Option<Pin>> {
        self.measure("get_pin_by_name", |inner| inner.get_pin_by_name(name))
    }

    fn get_pins_by_category(&self, category: &str) -> CatalogResult<Vec<Pin>> {
        self.measure("get_pins_by_category", |inner| {
            inner.get_pins_by_category(category)
        })
    }
}
