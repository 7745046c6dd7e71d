//! Board source over a legacy catalog database.
//!
//! # Responsibility
//! - Read boards, pins, categories and their link tables in one pass.
//! - Assemble them into `BoardRecord`s.
//!
//! # Invariants
//! - A pin's primary `idcategory` tag is applied before its `category_pin`
//!   links.
//! - Links that reference unknown pins, boards or categories are skipped.
//! - Pins without a known board are dropped.
//! - Row order follows `rowid`, i.e. insertion order in the database.
//! - A missing or NULL board description loads as `""`.

use crate::db::{DbError, DbResult};
use crate::hydrate::{BoardSource, HydrateResult};
use crate::model::board::{BoardId, BoardRecord};
use crate::model::category::CategorySet;
use crate::model::pin::Pin;
use log::info;
use rusqlite::Connection;
use std::collections::HashMap;

const REQUIRED_TABLES: &[&str] = &["board", "pin", "category", "category_pin", "category_board"];

/// Read-only board source backed by an open SQLite connection.
pub struct SqliteBoardSource<'conn> {
    conn: &'conn Connection,
    board_has_description: bool,
}

impl<'conn> SqliteBoardSource<'conn> {
    /// Wraps `conn` after checking every table the loader reads exists.
    ///
    /// `board.description` is optional; when the column is absent every
    /// board loads with an empty description.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(DbError::MissingTable(*table));
            }
        }
        let board_has_description = table_has_column(conn, "board", "description")?;
        Ok(Self {
            conn,
            board_has_description,
        })
    }
}

impl BoardSource for SqliteBoardSource<'_> {
    fn load_all_boards(&self) -> HydrateResult<Vec<BoardRecord>> {
        let categories = self.load_categories()?;

        let mut pins: Vec<(Option<BoardId>, Pin)> = Vec::new();
        let mut pin_index: HashMap<String, usize> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT idpin, iduser, name, description, url, idcategory, idboard
                 FROM pin
                 ORDER BY rowid;",
            )?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let mut pin = Pin::new(
                    row.get::<_, String>("idpin")?,
                    row.get::<_, String>("iduser")?,
                    row.get::<_, String>("name")?,
                    row.get::<_, Option<String>>("description")?
                        .unwrap_or_default(),
                    row.get::<_, String>("url")?,
                );
                if let Some(primary) = row
                    .get::<_, Option<i64>>("idcategory")?
                    .and_then(|id| categories.get(&id))
                {
                    pin.add_category(primary);
                }
                pin_index.insert(pin.id().to_string(), pins.len());
                pins.push((row.get("idboard")?, pin));
            }
        }

        for (category_id, pin_id) in self.load_links::<String>("category_pin", "idpin")? {
            if let (Some(&index), Some(category)) =
                (pin_index.get(&pin_id), categories.get(&category_id))
            {
                pins[index].1.add_category(category);
            }
        }

        let mut boards: Vec<(BoardRecord, CategorySet)> = Vec::new();
        let mut board_index: HashMap<BoardId, usize> = HashMap::new();
        {
            let description = if self.board_has_description {
                "description"
            } else {
                "NULL AS description"
            };
            let mut stmt = self.conn.prepare(&format!(
                "SELECT idboard, iduser, name, {description}
                 FROM board
                 ORDER BY rowid;"
            ))?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let record = BoardRecord {
                    id: row.get("idboard")?,
                    user_id: row.get("iduser")?,
                    name: row.get("name")?,
                    description: row
                        .get::<_, Option<String>>("description")?
                        .unwrap_or_default(),
                    pins: Vec::new(),
                    categories: Vec::new(),
                };
                board_index.insert(record.id, boards.len());
                boards.push((record, CategorySet::new()));
            }
        }

        for (category_id, board_id) in self.load_links::<BoardId>("category_board", "idboard")? {
            if let (Some(&index), Some(category)) =
                (board_index.get(&board_id), categories.get(&category_id))
            {
                boards[index].1.insert(category);
            }
        }

        for (board_id, pin) in pins {
            if let Some(&index) = board_id.and_then(|id| board_index.get(&id)) {
                boards[index].0.pins.push(pin);
            }
        }

        let records: Vec<BoardRecord> = boards
            .into_iter()
            .map(|(mut record, tags)| {
                record.categories = tags.into();
                record
            })
            .collect();

        info!(
            "event=board_load module=hydrate status=ok boards={} pins={}",
            records.len(),
            records.iter().map(|record| record.pins.len()).sum::<usize>()
        );
        Ok(records)
    }
}

impl SqliteBoardSource<'_> {
    fn load_categories(&self) -> DbResult<HashMap<i64, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT idcategory, desccategory FROM category;")?;
        let mut rows = stmt.query([])?;
        let mut categories = HashMap::new();
        while let Some(row) = rows.next()? {
            categories.insert(row.get(0)?, row.get(1)?);
        }
        Ok(categories)
    }

    fn load_links<T: rusqlite::types::FromSql>(
        &self,
        table: &str,
        target_column: &str,
    ) -> DbResult<Vec<(i64, T)>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT idcategory, {target_column} FROM {table} ORDER BY rowid;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut links = Vec::new();
        while let Some(row) = rows.next()? {
            links.push((row.get(0)?, row.get(1)?));
        }
        Ok(links)
    }
}

fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
