//! Catalog use-case services.
//!
//! # Responsibility
//! - Expose the catalog contract to request-layer callers through one
//!   shared access point.
//! - Keep callers decoupled from how the store chain is composed.

pub mod catalog_service;
