//! SQLite cursor
//!
//! Runs probes over a borrowed `rusqlite::Connection`. Each `execute`
//! materializes the full result so rows can be fetched afterwards
//! without holding a statement borrow.

use std::collections::VecDeque;
use std::path::Path;
use log::trace;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use crate::core::errors::{Result, ValidationError};
use crate::core::value::{Row, Value};
use crate::sql::Cursor;

/// A [`Cursor`] over a SQLite connection
pub struct SqliteCursor<'conn> {
    conn: &'conn Connection,
    pending: VecDeque<Row>,
}

impl<'conn> SqliteCursor<'conn> {
    /// Create a cursor borrowing `conn`
    pub fn new(conn: &'conn Connection) -> Self {
        SqliteCursor {
            conn,
            pending: VecDeque::new(),
        }
    }

    /// The underlying connection
    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    fn run(&self, sql: &str) -> rusqlite::Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();
        let mut rows = stmt.query([])?;

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(convert(row.get_ref(idx)?));
            }
            result.push(cells);
        }
        Ok(result)
    }
}

fn convert(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) | ValueRef::Blob(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
    }
}

/// Open a database file for probing. The file must already exist.
pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| ValidationError::SqlExecution {
            sql: format!("<open {}>", path.display()),
            source: Box::new(e),
        })
}

impl Cursor for SqliteCursor<'_> {
    fn execute(&mut self, sql: &str) -> Result<()> {
        self.pending.clear();

        let rows = self.run(sql).map_err(|e| ValidationError::SqlExecution {
            sql: sql.to_string(),
            source: Box::new(e),
        })?;

        trace!("SQLite returned {} rows", rows.len());
        self.pending = rows.into();
        Ok(())
    }

    fn fetch_one(&mut self) -> Result<Option<Row>> {
        Ok(self.pending.pop_front())
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        Ok(self.pending.drain(..).collect())
    }
}
