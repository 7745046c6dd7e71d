//! Domain model for the pin catalog.
//!
//! # Responsibility
//! - Define pins, boards and their category tag sets.
//!
//! # Invariants
//! - A pin belongs to at most one board at a time.
//! - Category sets are unique under case folding.

pub mod board;
pub mod category;
pub mod pin;
