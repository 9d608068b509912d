//! Dependency candidates
//!
//! A candidate is an unverified dependency hypothesis emitted by a
//! discovery tool. Candidates are immutable values; validating one
//! borrows a cursor for the duration of the call and keeps no state.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::errors::Result;
use crate::core::kind::DependencyKind;
use crate::sql::validator::{self, ValidationOptions};
use crate::sql::Cursor;

/// All non-null values of `column` in `table` are pairwise distinct
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueCandidate {
    pub table: String,
    pub column: String,
}

/// Sorting `table` by `ordering_column` leaves `ordered_column` non-decreasing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderCandidate {
    pub table: String,
    pub ordering_column: String,
    pub ordered_column: String,
}

/// Every non-null foreign value appears among the primary values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InclusionCandidate {
    pub foreign_key_table: String,
    pub foreign_key_column: String,
    pub primary_key_table: String,
    pub primary_key_column: String,
}

/// At least one of `columns` is a unique column of `table`.
///
/// The column order is the priority order of the discovery tool, most
/// likely key first, and is checked in that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionalCandidate {
    pub table: String,
    pub columns: Vec<String>,
}

impl UniqueCandidate {
    pub fn new<S: Into<String>>(table: S, column: S) -> Self {
        UniqueCandidate {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl OrderCandidate {
    pub fn new<S: Into<String>>(table: S, ordering_column: S, ordered_column: S) -> Self {
        OrderCandidate {
            table: table.into(),
            ordering_column: ordering_column.into(),
            ordered_column: ordered_column.into(),
        }
    }
}

impl InclusionCandidate {
    pub fn new<S: Into<String>>(
        foreign_key_table: S,
        foreign_key_column: S,
        primary_key_table: S,
        primary_key_column: S,
    ) -> Self {
        InclusionCandidate {
            foreign_key_table: foreign_key_table.into(),
            foreign_key_column: foreign_key_column.into(),
            primary_key_table: primary_key_table.into(),
            primary_key_column: primary_key_column.into(),
        }
    }
}

impl FunctionalCandidate {
    pub fn new<S: Into<String>>(table: S, columns: Vec<String>) -> Self {
        FunctionalCandidate {
            table: table.into(),
            columns,
        }
    }
}

impl fmt::Display for UniqueCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

impl fmt::Display for OrderCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} |-> {}.{}",
            self.table, self.ordering_column, self.table, self.ordered_column)
    }
}

impl fmt::Display for InclusionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} |-> {}.{}",
            self.foreign_key_table, self.foreign_key_column,
            self.primary_key_table, self.primary_key_column)
    }
}

impl fmt::Display for FunctionalCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.columns
            .iter()
            .map(|column| format!("{}.{}", self.table, column))
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{}", rendered)
    }
}

/// A dependency candidate of any kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DependencyCandidate {
    #[serde(rename = "UCC")]
    Unique(UniqueCandidate),
    #[serde(rename = "OD")]
    Order(OrderCandidate),
    #[serde(rename = "IND")]
    Inclusion(InclusionCandidate),
    #[serde(rename = "FD")]
    Functional(FunctionalCandidate),
}

impl DependencyCandidate {
    /// The kind of this candidate
    pub fn kind(&self) -> DependencyKind {
        match self {
            DependencyCandidate::Unique(_) => DependencyKind::Unique,
            DependencyCandidate::Order(_) => DependencyKind::Order,
            DependencyCandidate::Inclusion(_) => DependencyKind::Inclusion,
            DependencyCandidate::Functional(_) => DependencyKind::Functional,
        }
    }

    /// Kind token followed by the canonical rendering, e.g. `UCC date_dim.d_dow`
    pub fn label(&self) -> String {
        format!("{} {}", self.kind(), self)
    }

    /// Check the hypothesis against the database behind `cursor`
    pub fn validate<C: Cursor + ?Sized>(&self, cursor: &mut C) -> Result<bool> {
        self.validate_with(cursor, &ValidationOptions::default())
    }

    /// Like [`validate`](Self::validate), with explicit options
    pub fn validate_with<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        options: &ValidationOptions,
    ) -> Result<bool> {
        match self {
            DependencyCandidate::Unique(c) => {
                validator::validate_ucc(cursor, &c.table, &c.column)
            },
            DependencyCandidate::Order(c) => {
                validator::validate_od(cursor, &c.table, &c.ordering_column, &c.ordered_column)
            },
            DependencyCandidate::Inclusion(c) => validator::validate_ind(
                cursor,
                &c.foreign_key_table,
                &c.foreign_key_column,
                &c.primary_key_table,
                &c.primary_key_column,
                options.inclusion_strategy,
            ),
            DependencyCandidate::Functional(c) => {
                validator::validate_fd(cursor, &c.table, &c.columns)
            },
        }
    }

    /// Validate `repetitions` times, discarding the verdicts.
    ///
    /// Stops at the first error.
    pub fn validate_repeatedly<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        repetitions: usize,
    ) -> Result<()> {
        self.validate_repeatedly_with(cursor, repetitions, &ValidationOptions::default())
    }

    pub fn validate_repeatedly_with<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        repetitions: usize,
        options: &ValidationOptions,
    ) -> Result<()> {
        for _ in 0..repetitions {
            self.validate_with(cursor, options)?;
        }
        Ok(())
    }
}

impl fmt::Display for DependencyCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyCandidate::Unique(c) => fmt::Display::fmt(c, f),
            DependencyCandidate::Order(c) => fmt::Display::fmt(c, f),
            DependencyCandidate::Inclusion(c) => fmt::Display::fmt(c, f),
            DependencyCandidate::Functional(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl From<UniqueCandidate> for DependencyCandidate {
    fn from(c: UniqueCandidate) -> Self {
        DependencyCandidate::Unique(c)
    }
}

impl From<OrderCandidate> for DependencyCandidate {
    fn from(c: OrderCandidate) -> Self {
        DependencyCandidate::Order(c)
    }
}

impl From<InclusionCandidate> for DependencyCandidate {
    fn from(c: InclusionCandidate) -> Self {
        DependencyCandidate::Inclusion(c)
    }
}

impl From<FunctionalCandidate> for DependencyCandidate {
    fn from(c: FunctionalCandidate) -> Self {
        DependencyCandidate::Functional(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ValidationError;
    use crate::sql::SqliteCursor;
    use rusqlite::Connection;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE customer (c_custkey INTEGER, c_name TEXT, c_nation INTEGER);
             INSERT INTO customer VALUES (1, 'alice', 10), (2, 'bob', 10), (3, 'carol', 20);",
        ).unwrap();
        conn
    }

    #[test]
    fn test_rendering() {
        let ucc: DependencyCandidate = UniqueCandidate::new("date_dim", "d_dow").into();
        let od: DependencyCandidate = OrderCandidate::new("hd", "hd_demo_sk", "hd_dep_count").into();
        let ind: DependencyCandidate =
            InclusionCandidate::new("store_returns", "sr_store_sk", "store", "s_store_sk").into();
        let fd: DependencyCandidate = FunctionalCandidate::new(
            "customer",
            vec!["c_custkey".to_string(), "c_name".to_string()],
        ).into();

        assert_eq!(ucc.to_string(), "date_dim.d_dow");
        assert_eq!(od.to_string(), "hd.hd_demo_sk |-> hd.hd_dep_count");
        assert_eq!(ind.to_string(), "store_returns.sr_store_sk |-> store.s_store_sk");
        assert_eq!(fd.to_string(), "customer.c_custkey, customer.c_name");
        assert_eq!(ucc.label(), "UCC date_dim.d_dow");
    }

    #[test]
    fn test_kind() {
        let fd: DependencyCandidate = FunctionalCandidate::new("t", vec!["a".to_string()]).into();
        assert_eq!(fd.kind(), DependencyKind::Functional);
    }

    #[test]
    fn test_validate_dispatch() {
        let conn = test_db();
        let mut cursor = SqliteCursor::new(&conn);

        let key: DependencyCandidate = UniqueCandidate::new("customer", "c_custkey").into();
        let nation: DependencyCandidate = UniqueCandidate::new("customer", "c_nation").into();

        assert!(key.validate(&mut cursor).unwrap());
        assert!(!nation.validate(&mut cursor).unwrap());
    }

    #[test]
    fn test_validate_repeatedly_propagates_errors() {
        let conn = test_db();
        let mut cursor = SqliteCursor::new(&conn);

        let ok: DependencyCandidate = UniqueCandidate::new("customer", "c_custkey").into();
        ok.validate_repeatedly(&mut cursor, 3).unwrap();
        ok.validate_repeatedly(&mut cursor, 0).unwrap();

        let missing: DependencyCandidate = UniqueCandidate::new("nope", "c_custkey").into();
        assert!(matches!(
            missing.validate_repeatedly(&mut cursor, 3),
            Err(ValidationError::SqlExecution { .. })
        ));
    }

    #[test]
    fn test_serialize_tagged() {
        let ucc: DependencyCandidate = UniqueCandidate::new("date_dim", "d_dow").into();
        let json = serde_json::to_value(&ucc).unwrap();
        assert_eq!(json["kind"], "UCC");
        assert_eq!(json["table"], "date_dim");
        assert_eq!(json["column"], "d_dow");
    }
}
