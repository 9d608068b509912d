//! SQL text for each probe
//!
//! Identifiers are spliced in verbatim. The log parser only ever yields
//! `\w+` names, so nothing here needs quoting.

use std::fmt;
use std::str::FromStr;
use clap::ValueEnum;
use serde::{Serialize, Deserialize};

/// How an inclusion dependency is probed.
///
/// All three formulations return a row exactly when some non-null foreign
/// value has no partner on the primary side. The outer join is usually the
/// fastest and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InclusionStrategy {
    /// Anti-join via `LEFT OUTER JOIN ... WHERE pk IS NULL`
    #[default]
    OuterJoin,
    /// Set difference via `NOT IN (SELECT pk ...)`
    NotIn,
    /// Correlated `NOT EXISTS` subquery
    NotExists,
}

impl fmt::Display for InclusionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InclusionStrategy::OuterJoin => "outer-join",
            InclusionStrategy::NotIn => "not-in",
            InclusionStrategy::NotExists => "not-exists",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for InclusionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <InclusionStrategy as ValueEnum>::from_str(s, true)
    }
}

/// `SELECT COUNT(DISTINCT column) = COUNT(column) FROM table`
pub fn unique_query(table: &str, column: &str) -> String {
    format!("SELECT COUNT(DISTINCT {column}) = COUNT({column}) FROM {table}")
}

/// `SELECT ordered FROM table ORDER BY ordering ASC`
pub fn order_query(table: &str, ordering_column: &str, ordered_column: &str) -> String {
    format!("SELECT {ordered_column} FROM {table} ORDER BY {ordering_column} ASC")
}

/// Probe returning at most one foreign value without a primary partner
pub fn inclusion_query(
    foreign_key_table: &str,
    foreign_key_column: &str,
    primary_key_table: &str,
    primary_key_column: &str,
    strategy: InclusionStrategy,
) -> String {
    let (fk_table, fk_col, pk_table, pk_col) =
        (foreign_key_table, foreign_key_column, primary_key_table, primary_key_column);

    match strategy {
        InclusionStrategy::OuterJoin => format!(
            "SELECT fk.{fk_col} FROM {fk_table} AS fk \
             LEFT OUTER JOIN {pk_table} AS pk ON fk.{fk_col} = pk.{pk_col} \
             WHERE pk.{pk_col} IS NULL AND fk.{fk_col} IS NOT NULL LIMIT 1"
        ),
        // NULLs on the primary side would make every NOT IN comparison UNKNOWN
        InclusionStrategy::NotIn => format!(
            "SELECT fk.{fk_col} FROM {fk_table} AS fk \
             WHERE fk.{fk_col} NOT IN (SELECT pk.{pk_col} FROM {pk_table} AS pk WHERE pk.{pk_col} IS NOT NULL) \
             AND fk.{fk_col} IS NOT NULL LIMIT 1"
        ),
        InclusionStrategy::NotExists => format!(
            "SELECT fk.{fk_col} FROM {fk_table} AS fk \
             WHERE NOT EXISTS (SELECT * FROM {pk_table} AS pk WHERE fk.{fk_col} = pk.{pk_col}) \
             AND fk.{fk_col} IS NOT NULL LIMIT 1"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_query() {
        assert_eq!(
            unique_query("date_dim", "d_dow"),
            "SELECT COUNT(DISTINCT d_dow) = COUNT(d_dow) FROM date_dim"
        );
    }

    #[test]
    fn test_order_query() {
        assert_eq!(
            order_query("hd", "hd_demo_sk", "hd_dep_count"),
            "SELECT hd_dep_count FROM hd ORDER BY hd_demo_sk ASC"
        );
    }

    #[test]
    fn test_inclusion_query_outer_join() {
        let sql = inclusion_query("store_returns", "sr_store_sk", "store", "s_store_sk",
            InclusionStrategy::OuterJoin);
        assert!(sql.contains("LEFT OUTER JOIN store AS pk ON fk.sr_store_sk = pk.s_store_sk"));
        assert!(sql.contains("pk.s_store_sk IS NULL"));
        assert!(sql.contains("fk.sr_store_sk IS NOT NULL"));
        assert!(sql.ends_with("LIMIT 1"));
    }

    #[test]
    fn test_inclusion_query_alternatives() {
        let not_in = inclusion_query("a", "x", "b", "y", InclusionStrategy::NotIn);
        assert!(not_in.contains("NOT IN (SELECT pk.y FROM b AS pk"));

        let not_exists = inclusion_query("a", "x", "b", "y", InclusionStrategy::NotExists);
        assert!(not_exists.contains("NOT EXISTS (SELECT * FROM b AS pk WHERE fk.x = pk.y)"));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("not-in".parse::<InclusionStrategy>().unwrap(), InclusionStrategy::NotIn);
        assert_eq!(InclusionStrategy::default().to_string(), "outer-join");
        assert!("anti-join".parse::<InclusionStrategy>().is_err());
    }
}
