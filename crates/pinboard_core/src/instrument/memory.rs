//! Resident-memory delta decorator.
//!
//! # Invariants
//! - Probe failures never fail the wrapped call; the observation then carries
//!   no delta.

use crate::instrument::{default_observer, CallObserver, Metric, Observation};
use crate::model::board::BoardRef;
use crate::model::pin::Pin;
use crate::store::{CatalogResult, CatalogStore};
use std::sync::{Arc, Mutex};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Source of the current process resident set size.
pub trait MemoryProbe: Send + Sync {
    /// Resident set size in bytes, or `None` when it cannot be read.
    fn resident_bytes(&self) -> Option<u64>;
}

/// `sysinfo`-backed probe for the running process.
pub struct ProcessMemoryProbe {
    pid: Option<Pid>,
    system: Mutex<System>,
}

impl ProcessMemoryProbe {
    pub fn new() -> Self {
        Self {
            pid: sysinfo::get_current_pid().ok(),
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for ProcessMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcessMemoryProbe {
    fn resident_bytes(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(pid).map(|process| process.memory())
    }
}

/// Records the resident-memory change of every call forwarded to `inner`.
pub struct MemoryDecorator<S: CatalogStore> {
    inner: S,
    probe: Arc<dyn MemoryProbe>,
    observer: Arc<dyn CallObserver>,
}

impl<S: CatalogStore> MemoryDecorator<S> {
    /// Wraps `inner` with the process probe and `LogObserver`.
    pub fn new(inner: S) -> Self {
        Self::with_parts(inner, Arc::new(ProcessMemoryProbe::new()), default_observer())
    }

    pub fn with_parts(
        inner: S,
        probe: Arc<dyn MemoryProbe>,
        observer: Arc<dyn CallObserver>,
    ) -> Self {
        Self {
            inner,
            probe,
            observer,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn measure<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&S) -> CatalogResult<T>,
    ) -> CatalogResult<T> {
        let before = self.probe.resident_bytes();
        let result = call(&self.inner)?;
        let after = self.probe.resident_bytes();
        let delta = match (before, after) {
            (Some(before), Some(after)) => Some(after as i64 - before as i64),
            _ => None,
        };
        self.observer.observe(&Observation {
            operation,
            metric: Metric::ResidentDelta(delta),
        });
        Ok(result)
    }
}

impl<S: CatalogStore> CatalogStore for MemoryDecorator<S> {
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

#[cfg(test)]
mod tests {
    use super::{MemoryProbe, ProcessMemoryProbe};

    #[test]
    fn process_probe_reads_nonzero_resident_size() {
        let probe = ProcessMemoryProbe::new();
        if let Some(bytes) = probe.resident_bytes() {
            assert!(bytes > 0);
        }
    }
}
