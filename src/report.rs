//! Batch validation
//!
//! Validates a list of candidates one after another over a single cursor.
//! Unlike [`DependencyCandidate::validate`], a failing candidate does not
//! abort the batch: the error is logged and kept in the report.

use std::collections::BTreeMap;
use std::time::Instant;
use chrono::Utc;
use log::{info, warn};
use serde::Serialize;

use crate::core::candidate::DependencyCandidate;
use crate::core::kind::DependencyKind;
use crate::sql::validator::ValidationOptions;
use crate::sql::Cursor;

/// Outcome of validating one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum Verdict {
    /// The dependency holds
    Valid,
    /// The database disproved the dependency
    Invalid,
    /// The probe could not be run
    Failed(String),
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::Invalid => "invalid",
            Verdict::Failed(_) => "failed",
        }
    }
}

/// A candidate together with its verdict
#[derive(Debug, Clone, Serialize)]
pub struct CandidateOutcome {
    pub candidate: DependencyCandidate,
    pub verdict: Verdict,
    /// Wall time of the validation in microseconds
    pub elapsed_micros: u128,
}

/// Verdict counts for one kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub valid: usize,
    pub invalid: usize,
    pub failed: usize,
}

/// Result of a batch validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// RFC 3339 timestamp of when the batch finished
    pub generated_at: String,
    pub options: ValidationOptions,
    pub outcomes: Vec<CandidateOutcome>,
}

impl ValidationReport {
    /// Verdict counts grouped by kind, in kind order
    pub fn counts(&self) -> BTreeMap<DependencyKind, KindCounts> {
        let mut counts: BTreeMap<DependencyKind, KindCounts> = BTreeMap::new();
        for outcome in &self.outcomes {
            let entry = counts.entry(outcome.candidate.kind()).or_default();
            match outcome.verdict {
                Verdict::Valid => entry.valid += 1,
                Verdict::Invalid => entry.invalid += 1,
                Verdict::Failed(_) => entry.failed += 1,
            }
        }
        counts
    }

    /// Number of candidates whose probe failed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.verdict, Verdict::Failed(_)))
            .count()
    }
}

/// Validate `candidates` in order.
///
/// When `kinds` is non-empty, only candidates of those kinds are validated.
pub fn validate_all<C: Cursor + ?Sized>(
    candidates: &[DependencyCandidate],
    cursor: &mut C,
    options: &ValidationOptions,
    kinds: &[DependencyKind],
) -> ValidationReport {
    let selected: Vec<&DependencyCandidate> = candidates
        .iter()
        .filter(|c| kinds.is_empty() || kinds.contains(&c.kind()))
        .collect();
    info!("Validating {} of {} candidates", selected.len(), candidates.len());

    let mut outcomes = Vec::with_capacity(selected.len());
    for candidate in selected {
        let start = Instant::now();
        let verdict = match candidate.validate_with(&mut *cursor, options) {
            Ok(true) => Verdict::Valid,
            Ok(false) => Verdict::Invalid,
            Err(e) => {
                warn!("Validation of {} failed: {}", candidate.label(), e);
                Verdict::Failed(e.to_string())
            },
        };

        outcomes.push(CandidateOutcome {
            candidate: candidate.clone(),
            verdict,
            elapsed_micros: start.elapsed().as_micros(),
        });
    }

    ValidationReport {
        generated_at: Utc::now().to_rfc3339(),
        options: *options,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use crate::sql::SqliteCursor;
    use rusqlite::Connection;

    const LOG: &str = "\
Checking UCC customer.c_custkey
Checking UCC customer.c_nation
Checking OD customer.c_custkey |-> customer.c_acctbal
Checking IND orders.o_custkey in customer.c_custkey
Checking FD customer.c_nation, customer.c_custkey
Checking UCC customer.c_missing
";

    fn tpch_like() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE customer (c_custkey INTEGER, c_nation INTEGER, c_acctbal INTEGER);
             CREATE TABLE orders (o_orderkey INTEGER, o_custkey INTEGER);
             INSERT INTO customer VALUES (1, 5, 100), (2, 5, 200), (3, 7, 150);
             INSERT INTO orders VALUES (10, 1), (11, 3), (12, NULL);",
        ).unwrap();
        conn
    }

    #[test]
    fn test_batch_keeps_going_after_errors() {
        let conn = tpch_like();
        let mut cursor = SqliteCursor::new(&conn);
        let candidates = parser::parse_str(LOG).unwrap();

        let report = validate_all(&candidates, &mut cursor, &ValidationOptions::default(), &[]);
        let verdicts: Vec<&str> = report.outcomes.iter().map(|o| o.verdict.as_str()).collect();
        assert_eq!(verdicts, vec!["valid", "invalid", "invalid", "valid", "valid", "failed"]);
        assert_eq!(report.failed(), 1);

        let counts = report.counts();
        assert_eq!(counts[&DependencyKind::Unique], KindCounts { valid: 1, invalid: 1, failed: 1 });
        assert_eq!(counts[&DependencyKind::Order], KindCounts { valid: 0, invalid: 1, failed: 0 });
    }

    #[test]
    fn test_kind_filter() {
        let conn = tpch_like();
        let mut cursor = SqliteCursor::new(&conn);
        let candidates = parser::parse_str(LOG).unwrap();

        let report = validate_all(
            &candidates,
            &mut cursor,
            &ValidationOptions::default(),
            &[DependencyKind::Inclusion, DependencyKind::Functional],
        );
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.outcomes.iter().all(|o| o.verdict == Verdict::Valid));
    }

    #[test]
    fn test_report_json() {
        let conn = tpch_like();
        let mut cursor = SqliteCursor::new(&conn);
        let candidates = parser::parse_str("Checking UCC customer.c_missing").unwrap();

        let report = validate_all(&candidates, &mut cursor, &ValidationOptions::default(), &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["options"]["inclusion_strategy"], "outer-join");
        assert_eq!(json["outcomes"][0]["verdict"]["status"], "failed");
        assert_eq!(json["outcomes"][0]["candidate"]["kind"], "UCC");
    }
}
