//! Startup bulk load of boards into the catalog.
//!
//! # Responsibility
//! - Define the single persistence capability core consumes: load every board
//!   with its pins and categories.
//!
//! # Invariants
//! - Sources are read once at startup; later catalog mutations are not
//!   written back.

use crate::db::DbError;
use crate::model::board::BoardRecord;
use crate::store::CatalogError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqliteBoardSource;

pub type HydrateResult<T> = Result<T, HydrateError>;

/// Failure while loading boards or inserting them into the catalog.
#[derive(Debug)]
pub enum HydrateError {
    Db(DbError),
    Catalog(CatalogError),
}

impl Display for HydrateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HydrateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<DbError> for HydrateError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for HydrateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<CatalogError> for HydrateError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Bulk provider of fully populated boards.
pub trait BoardSource {
    fn load_all_boards(&self) -> HydrateResult<Vec<BoardRecord>>;
}

/// Pre-built records, used by fixtures and JSON imports.
impl BoardSource for Vec<BoardRecord> {
    fn load_all_boards(&self) -> HydrateResult<Vec<BoardRecord>> {
        Ok(self.clone())
    }
}
