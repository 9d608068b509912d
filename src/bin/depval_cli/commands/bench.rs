use std::path::Path;
use anyhow::Result;
use depval::bench::Benchmark;
use depval::{candidates_from_log, SqliteCursor};
use crate::context::Context;

/// Execute the bench command
pub fn execute(context: &mut Context, log: &Path, database: &Path, repetitions: usize) -> Result<()> {
    let candidates = candidates_from_log(log)?;
    let conn = context.open_database(database)?;
    let mut cursor = SqliteCursor::new(&conn);

    let mut benchmark = Benchmark::new(&mut cursor, *context.options());
    benchmark.run_all(&candidates, repetitions);

    let formatted = context.formatter().format_benchmark(
        benchmark.results(),
        &benchmark.summaries(),
        benchmark.failures(),
    )?;
    println!("{}", formatted);

    Ok(())
}
