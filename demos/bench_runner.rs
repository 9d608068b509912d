//! Benchmark runner for depval
//!
//! This example measures how long each candidate of a generated log
//! takes to validate against a SQLite database on disk.

use std::fmt::Write as _;
use rusqlite::Connection;
use depval::bench::Benchmark;
use depval::{parse_str, SqliteCursor, ValidationOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("depval Validation Benchmark");
    println!("===========================");

    // Create a temporary database for benchmarking
    let bench_dir = tempfile::tempdir()?;
    let conn = Connection::open(bench_dir.path().join("bench.db"))?;

    conn.execute_batch(
        "CREATE TABLE nation (n_nationkey INTEGER, n_regionkey INTEGER);
         CREATE TABLE supplier (s_suppkey INTEGER, s_nationkey INTEGER, s_acctbal INTEGER);",
    )?;
    for n in 0..25 {
        conn.execute("INSERT INTO nation VALUES (?1, ?2)", [n, n % 5])?;
    }
    for s in 0..10_000 {
        conn.execute("INSERT INTO supplier VALUES (?1, ?2, ?3)", [s, s % 25, s * 3])?;
    }

    let mut log = String::new();
    writeln!(log, "Checking UCC supplier.s_suppkey")?;
    writeln!(log, "Checking UCC supplier.s_nationkey")?;
    writeln!(log, "Checking OD supplier.s_suppkey |-> supplier.s_acctbal")?;
    writeln!(log, "Checking IND supplier.s_nationkey in nation.n_nationkey")?;
    writeln!(log, "Checking FD nation.n_regionkey, nation.n_nationkey")?;

    let candidates = parse_str(&log)?;
    let mut cursor = SqliteCursor::new(&conn);

    let mut benchmark = Benchmark::new(&mut cursor, ValidationOptions::default());
    benchmark.run_all(&candidates, 20);
    benchmark.print_results();

    println!("\nBenchmark completed successfully.");

    Ok(())
}
