//! Per-kind validation routines
//!
//! Each routine issues read-only SQL through the supplied cursor and turns
//! the result into a verdict. Driver errors are returned as-is; nothing is
//! retried.

use log::{debug, trace};
use serde::{Serialize, Deserialize};

use crate::core::errors::{Result, ValidationError};
use crate::core::value::{Row, Value};
use crate::sql::queries::{self, InclusionStrategy};
use crate::sql::Cursor;

/// Knobs that change how candidates are probed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Formulation used for inclusion dependencies
    pub inclusion_strategy: InclusionStrategy,
}

fn first_cell(row: &Row, sql: &str) -> Result<Value> {
    row.first().cloned().ok_or_else(|| ValidationError::UnexpectedResult {
        sql: sql.to_string(),
        reason: "row has no columns".to_string(),
    })
}

/// True iff the distinct count of `column` equals its non-null count.
///
/// NULLs drop out of both counts, so a column with repeated NULLs still
/// passes.
pub fn validate_ucc<C: Cursor + ?Sized>(cursor: &mut C, table: &str, column: &str) -> Result<bool> {
    let sql = queries::unique_query(table, column);
    debug!("UCC probe: {}", sql);

    cursor.execute(&sql)?;
    let row = cursor.fetch_one()?.ok_or_else(|| ValidationError::UnexpectedResult {
        sql: sql.clone(),
        reason: "expected one row, got none".to_string(),
    })?;

    first_cell(&row, &sql)?.as_bool()
}

/// Sort by `ordering_column` and check `ordered_column` never decreases.
///
/// Any NULL disproves the candidate. Values are compared as integers, so
/// the ordered column has to hold integer-like data.
pub fn validate_od<C: Cursor + ?Sized>(
    cursor: &mut C,
    table: &str,
    ordering_column: &str,
    ordered_column: &str,
) -> Result<bool> {
    let sql = queries::order_query(table, ordering_column, ordered_column);
    debug!("OD probe: {}", sql);

    cursor.execute(&sql)?;
    let rows = cursor.fetch_all()?;
    trace!("OD probe returned {} rows", rows.len());

    let mut last_value: Option<i64> = None;
    for row in &rows {
        let value = first_cell(row, &sql)?;
        if value.is_null() {
            return Ok(false);
        }

        let current = value.as_i64()?;
        if let Some(last) = last_value {
            if current < last {
                return Ok(false);
            }
        }
        last_value = Some(current);
    }

    Ok(true)
}

/// True iff the probe finds no non-null foreign value without a partner
pub fn validate_ind<C: Cursor + ?Sized>(
    cursor: &mut C,
    foreign_key_table: &str,
    foreign_key_column: &str,
    primary_key_table: &str,
    primary_key_column: &str,
    strategy: InclusionStrategy,
) -> Result<bool> {
    let sql = queries::inclusion_query(
        foreign_key_table,
        foreign_key_column,
        primary_key_table,
        primary_key_column,
        strategy,
    );
    debug!("IND probe ({}): {}", strategy, sql);

    cursor.execute(&sql)?;
    Ok(cursor.fetch_one()?.is_none())
}

/// True as soon as one of `columns`, in order, is unique in `table`.
///
/// This only recognizes FDs implied by a key column. It is not a general
/// FD check.
pub fn validate_fd<C: Cursor + ?Sized>(cursor: &mut C, table: &str, columns: &[String]) -> Result<bool> {
    for column in columns {
        if validate_ucc(cursor, table, column)? {
            debug!("FD on {} holds via unique column {}", table, column);
            return Ok(true);
        }
    }
    Ok(false)
}
