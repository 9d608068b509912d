use std::path::Path;
use anyhow::Result;
use depval::{candidates_from_log, validate_all, DependencyKind, SqliteCursor};
use crate::context::Context;
use crate::utils::error::CliError;

/// Execute the validate command
pub fn execute(context: &mut Context, log: &Path, database: &Path, kinds: &[DependencyKind]) -> Result<()> {
    let candidates = candidates_from_log(log)?;
    let conn = context.open_database(database)?;
    let mut cursor = SqliteCursor::new(&conn);

    let report = validate_all(&candidates, &mut cursor, context.options(), kinds);

    let formatted = context.formatter().format_report(&report)?;
    println!("{}", formatted);

    match report.failed() {
        0 => Ok(()),
        failed => Err(CliError::FailedCandidates(failed).into()),
    }
}
