//! Core catalog logic for Pinboard.
//! This crate owns the in-memory board/pin catalog and its instrumentation.

pub mod config;
pub mod db;
pub mod hydrate;
pub mod instrument;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::CatalogConfig;
pub use hydrate::{BoardSource, HydrateError, HydrateResult, SqliteBoardSource};
pub use instrument::{
    CallObserver, LogObserver, MemoryDecorator, MemoryProbe, Metric, Observation,
    ProcessMemoryProbe, TimingDecorator,
};
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::board::{Board, BoardId, BoardRecord, BoardRef};
pub use model::category::CategorySet;
pub use model::pin::{Pin, PinId, UserId};
pub use service::catalog_service::{CatalogService, InstrumentedCatalog, NewBoard, NewPin};
pub use store::{CatalogError, CatalogResult, CatalogStore, InMemoryCatalog};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
