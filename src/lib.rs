//! depval: SQL validation of discovered data dependencies
//!
//! This crate reads the candidate dependencies (unique columns, order,
//! inclusion and functional dependencies) that a discovery tool logs, and
//! checks each one against a live database with a dependency-specific
//! SQL probe.
//!
//! ```no_run
//! use depval::{candidates_from_log, SqliteCursor};
//!
//! # fn main() -> depval::Result<()> {
//! let conn = depval::sql::sqlite::open_read_only("tpch.db")?;
//! let mut cursor = SqliteCursor::new(&conn);
//!
//! for candidate in candidates_from_log("plugin.log")? {
//!     println!("{} -> {}", candidate.label(), candidate.validate(&mut cursor)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod parser;
pub mod sql;
pub mod bench;
pub mod report;

// Re-export the main types
pub use crate::core::candidate::{
    DependencyCandidate, FunctionalCandidate, InclusionCandidate, OrderCandidate, UniqueCandidate,
};
pub use crate::core::errors::{Result, ValidationError};
pub use crate::core::kind::DependencyKind;
pub use crate::core::value::{Row, Value};
pub use parser::{candidates_from_log, parse_reader, parse_str};
pub use sql::{Cursor, InclusionStrategy, SqliteCursor, ValidationOptions};
pub use report::{validate_all, ValidationReport, Verdict};
