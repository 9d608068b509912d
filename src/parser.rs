//! Discovery log parser
//!
//! Turns the `Checking <KIND> ...` lines of a dependency discovery log
//! into typed candidates. Lines without that marker are skipped.
//!
//! ```text
//! Checking OD household_demographics.hd_demo_sk |-> household_demographics.hd_dep_count
//! Checking UCC date_dim.d_dow
//! Checking IND store_returns.sr_store_sk in store.s_store_sk
//! Checking FD customer.c_custkey, customer.c_name
//! ```
//!
//! Each kind has its own extraction function, so a change in the log
//! format of one kind touches one function.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use log::{debug, info};
use regex::Regex;

use crate::core::candidate::{
    DependencyCandidate, FunctionalCandidate, InclusionCandidate, OrderCandidate, UniqueCandidate,
};
use crate::core::errors::{Result, ValidationError};
use crate::core::kind::DependencyKind;

static CHECKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Checking (\w+)").expect("valid marker pattern"));

static TABLE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\.(\w+)").expect("valid column pattern"));

static ORDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\.(\w+) \|-> (\w+)\.(\w+)").expect("valid OD pattern"));

static INCLUSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\.(\w+) in (\w+)\.(\w+)").expect("valid IND pattern"));

/// Parse every candidate in the log file at `path`
pub fn candidates_from_log<P: AsRef<Path>>(path: P) -> Result<Vec<DependencyCandidate>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ValidationError::FileNotFound(path.to_path_buf()));
    }

    let candidates = parse_reader(BufReader::new(File::open(path)?))?;
    info!("Parsed {} candidates from {}", candidates.len(), path.display());
    Ok(candidates)
}

/// Parse every candidate from a buffered reader
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<DependencyCandidate>> {
    let mut candidates = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        candidates.extend(parse_line(&line?, idx + 1)?);
    }
    Ok(candidates)
}

/// Parse every candidate from an in-memory log
pub fn parse_str(log: &str) -> Result<Vec<DependencyCandidate>> {
    parse_reader(log.as_bytes())
}

/// Parse a single log line. `line_no` is only used for error messages.
///
/// Returns an empty list for lines that declare no candidate.
pub fn parse_line(line: &str, line_no: usize) -> Result<Vec<DependencyCandidate>> {
    let Some(captures) = CHECKING.captures(line.trim()) else {
        return Ok(Vec::new());
    };

    let kind = DependencyKind::from_token(&captures[1])?;
    debug!("Line {}: {} candidate", line_no, kind);

    match kind {
        DependencyKind::Unique => parse_unique(line, line_no),
        DependencyKind::Order => parse_order(line, line_no).map(|c| vec![c]),
        DependencyKind::Inclusion => parse_inclusion(line, line_no),
        DependencyKind::Functional => parse_functional(line, line_no).map(|c| vec![c]),
    }
}

/// One UCC per `table.column` pair on the line
fn parse_unique(line: &str, line_no: usize) -> Result<Vec<DependencyCandidate>> {
    let candidates: Vec<DependencyCandidate> = TABLE_COLUMN
        .captures_iter(line)
        .map(|c| UniqueCandidate::new(&c[1], &c[2]).into())
        .collect();

    if candidates.is_empty() {
        return Err(ValidationError::malformed(line_no, format!("no UCC columns in '{}'", line)));
    }
    Ok(candidates)
}

/// Exactly one `t.a |-> t.b` tuple, both sides on the same table
fn parse_order(line: &str, line_no: usize) -> Result<DependencyCandidate> {
    let matches: Vec<_> = ORDER.captures_iter(line).collect();

    let captures = match matches.as_slice() {
        [captures] => captures,
        [] => return Err(ValidationError::malformed(line_no, format!("no OD in '{}'", line))),
        many => {
            return Err(ValidationError::malformed(
                line_no,
                format!("expected one OD, got {} in '{}'", many.len(), line),
            ))
        },
    };

    if captures[1] != captures[3] {
        return Err(ValidationError::malformed(
            line_no,
            format!("mismatching tables for OD: {} and {}", &captures[1], &captures[3]),
        ));
    }

    Ok(OrderCandidate::new(&captures[1], &captures[2], &captures[4]).into())
}

/// One IND per `fk.col in pk.col` tuple on the line
fn parse_inclusion(line: &str, line_no: usize) -> Result<Vec<DependencyCandidate>> {
    let candidates: Vec<DependencyCandidate> = INCLUSION
        .captures_iter(line)
        .map(|c| InclusionCandidate::new(&c[1], &c[2], &c[3], &c[4]).into())
        .collect();

    if candidates.is_empty() {
        return Err(ValidationError::malformed(line_no, format!("no IND in '{}'", line)));
    }
    Ok(candidates)
}

/// All pairs on the line form one FD; column order is kept
fn parse_functional(line: &str, line_no: usize) -> Result<DependencyCandidate> {
    let pairs: Vec<(String, String)> = TABLE_COLUMN
        .captures_iter(line)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();

    if pairs.len() < 2 {
        return Err(ValidationError::malformed(
            line_no,
            format!("expected several FD columns, got {} in '{}'", pairs.len(), line),
        ));
    }

    let table = pairs[0].0.clone();
    if let Some((other, _)) = pairs.iter().find(|(t, _)| *t != table) {
        return Err(ValidationError::malformed(
            line_no,
            format!("expected FD columns from one table, got {} and {}", table, other),
        ));
    }

    let columns = pairs.into_iter().map(|(_, column)| column).collect();
    Ok(FunctionalCandidate::new(table, columns).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_LOG: &str = "\
Starting discovery plugin
Checking OD household_demographics.hd_demo_sk |-> household_demographics.hd_dep_count
Checking UCC date_dim.d_dow
some unrelated output
Checking IND store_returns.sr_store_sk in store.s_store_sk
Checking FD customer.c_custkey, customer.c_name
Done
";

    #[test]
    fn test_sample_log() {
        let candidates = parse_str(SAMPLE_LOG).unwrap();
        assert_eq!(candidates.len(), 4);

        assert_eq!(
            candidates[0],
            DependencyCandidate::from(OrderCandidate::new("household_demographics", "hd_demo_sk", "hd_dep_count"))
        );
        assert_eq!(candidates[1], DependencyCandidate::from(UniqueCandidate::new("date_dim", "d_dow")));
        assert_eq!(
            candidates[2],
            DependencyCandidate::from(InclusionCandidate::new("store_returns", "sr_store_sk", "store", "s_store_sk"))
        );

        match &candidates[3] {
            DependencyCandidate::Functional(fd) => {
                assert_eq!(fd.table, "customer");
                assert_eq!(fd.columns, vec!["c_custkey", "c_name"]);
            },
            other => panic!("expected FD, got {:?}", other),
        }
    }

    #[test]
    fn test_one_of_each_kind() {
        let candidates = parse_str(SAMPLE_LOG).unwrap();
        for kind in DependencyKind::ALL {
            assert_eq!(candidates.iter().filter(|c| c.kind() == kind).count(), 1, "{}", kind);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(parse_str(SAMPLE_LOG).unwrap(), parse_str(SAMPLE_LOG).unwrap());
    }

    #[test]
    fn test_unrelated_lines() {
        assert!(parse_str("nothing here\n\nChecked UCC a.b\n").unwrap().is_empty());
        assert!(parse_line("   ", 1).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_kind() {
        let err = parse_str("Checking UCC a.b\nChecking MVD a.b\n").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCandidateKind(ref t) if t == "MVD"));
    }

    #[test]
    fn test_od_mismatched_tables() {
        let err = parse_line("Checking OD foo.bar |-> baz.qux", 7).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedCandidate { line: 7, .. }));
    }

    #[test]
    fn test_od_without_arrow() {
        let err = parse_line("Checking OD foo.bar", 1).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedCandidate { .. }));
    }

    #[test]
    fn test_zero_matches() {
        for line in ["Checking UCC nothing", "Checking IND a.b c.d", "Checking FD"] {
            let err = parse_line(line, 1).unwrap_err();
            assert!(matches!(err, ValidationError::MalformedCandidate { .. }), "{}", line);
        }
    }

    #[test]
    fn test_several_uccs_on_one_line() {
        let candidates = parse_line("Checking UCC nation.n_name, region.r_name", 1).unwrap();
        assert_eq!(candidates, vec![
            DependencyCandidate::from(UniqueCandidate::new("nation", "n_name")),
            DependencyCandidate::from(UniqueCandidate::new("region", "r_name")),
        ]);
    }

    #[test]
    fn test_fd_keeps_column_order() {
        let candidates = parse_line("Checking FD orders.o_comment, orders.o_orderkey, orders.o_clerk", 1).unwrap();
        assert_eq!(candidates, vec![DependencyCandidate::from(FunctionalCandidate::new(
            "orders",
            vec!["o_comment".to_string(), "o_orderkey".to_string(), "o_clerk".to_string()],
        ))]);
    }

    #[test]
    fn test_fd_mismatched_tables() {
        let err = parse_line("Checking FD orders.o_orderkey, lineitem.l_orderkey", 3).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedCandidate { line: 3, .. }));
    }

    #[test]
    fn test_fd_single_column() {
        let err = parse_line("Checking FD orders.o_orderkey", 1).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedCandidate { .. }));
    }

    #[test]
    fn test_log_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_LOG.as_bytes()).unwrap();

        let candidates = candidates_from_log(file.path()).unwrap();
        assert_eq!(candidates, parse_str(SAMPLE_LOG).unwrap());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("plugin.log");
        assert!(matches!(candidates_from_log(&missing), Err(ValidationError::FileNotFound(_))));

        // Directories are not log files either
        assert!(matches!(candidates_from_log(dir.path()), Err(ValidationError::FileNotFound(_))));
    }
}
