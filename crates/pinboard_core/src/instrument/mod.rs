//! Catalog instrumentation decorators.
//!
//! # Responsibility
//! - Wrap any `CatalogStore` and record one observation per forwarded call.
//! - Keep return values and failures of the wrapped store untouched.
//!
//! # Invariants
//! - Arguments reach the inner store unmodified.
//! - An observation is emitted only when the inner call returns `Ok`.
//! - Decorators compose in any order because each is itself a
//!   `CatalogStore`.

use log::info;
use std::sync::Arc;
use std::time::Duration;

pub mod memory;
pub mod timing;

pub use memory::{MemoryDecorator, MemoryProbe, ProcessMemoryProbe};
pub use timing::TimingDecorator;

/// Metric captured around one store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Wall-clock duration of the inner call.
    Elapsed(Duration),
    /// Resident-set-size change in bytes; `None` when the probe could not
    /// read the process memory.
    ResidentDelta(Option<i64>),
}

/// Structured record of one instrumented call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Store operation name, e.g. `add_board`.
    pub operation: &'static str,
    pub metric: Metric,
}

/// Sink receiving observations from decorators.
pub trait CallObserver: Send + Sync {
    fn observe(&self, observation: &Observation);
}

/// Default sink writing observations through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CallObserver for LogObserver {
    fn observe(&self, observation: &Observation) {
        match observation.metric {
            Metric::Elapsed(elapsed) => info!(
                "event=catalog_call module=instrument layer=timing status=ok op={} elapsed_us={}",
                observation.operation,
                elapsed.as_micros()
            ),
            Metric::ResidentDelta(Some(delta)) => info!(
                "event=catalog_call module=instrument layer=memory status=ok op={} delta_kb={:.2}",
                observation.operation,
                delta as f64 / 1024.0
            ),
            Metric::ResidentDelta(None) => info!(
                "event=catalog_call module=instrument layer=memory status=ok op={} delta_kb=unavailable",
                observation.operation
            ),
        }
    }
}

pub(crate) fn default_observer() -> Arc<dyn CallObserver> {
    Arc::new(LogObserver)
}
