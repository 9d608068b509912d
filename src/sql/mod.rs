//! SQL probes for dependency candidates
//!
//! The validator talks to a database only through the [`Cursor`] trait,
//! so any driver that can run a statement and hand back rows can be
//! plugged in. [`SqliteCursor`] is the bundled implementation.

pub mod queries;
pub mod sqlite;
pub mod validator;

use crate::core::errors::Result;
use crate::core::value::Row;

pub use queries::InclusionStrategy;
pub use sqlite::SqliteCursor;
pub use validator::ValidationOptions;

/// Trait defining the database boundary of the validator
pub trait Cursor {
    /// Execute a statement, replacing any pending result rows
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Take the next pending row, or `None` if the result is exhausted
    fn fetch_one(&mut self) -> Result<Option<Row>>;

    /// Take all remaining rows
    fn fetch_all(&mut self) -> Result<Vec<Row>>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn execute(&mut self, sql: &str) -> Result<()> {
        (**self).execute(sql)
    }

    fn fetch_one(&mut self) -> Result<Option<Row>> {
        (**self).fetch_one()
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        (**self).fetch_all()
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn execute(&mut self, sql: &str) -> Result<()> {
        (**self).execute(sql)
    }

    fn fetch_one(&mut self) -> Result<Option<Row>> {
        (**self).fetch_one()
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        (**self).fetch_all()
    }
}
