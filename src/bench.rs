//! Benchmarking system for depval
//!
//! This module measures the amortized cost of validating candidates,
//! per candidate and grouped by dependency kind.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};
use log::{info, warn};
use serde::Serialize;

use crate::core::candidate::DependencyCandidate;
use crate::core::errors::Result;
use crate::core::kind::DependencyKind;
use crate::sql::validator::ValidationOptions;
use crate::sql::Cursor;

/// A benchmark result for a single candidate
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    /// Kind token followed by the candidate rendering
    pub name: String,
    /// Kind of the candidate
    pub kind: DependencyKind,
    /// Verdict of the first validation
    pub valid: bool,
    /// Number of timed validations
    pub operations: usize,
    /// Total time taken by the timed validations
    #[serde(skip)]
    pub duration: Duration,
    /// Validations per second
    pub ops_per_second: f64,
    /// Time per validation in microseconds
    pub time_per_op_micros: f64,
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {} ops in {:?} ({:.2} ops/sec, {:.2} µs/op)",
            self.name, if self.valid { "valid" } else { "invalid" },
            self.operations, self.duration,
            self.ops_per_second, self.time_per_op_micros)
    }
}

/// Timing statistics for all candidates of one kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindSummary {
    pub kind: DependencyKind,
    pub candidates: usize,
    pub mean_micros: f64,
    pub median_micros: f64,
}

impl fmt::Display for KindSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} candidates, mean {:.2} µs, median {:.2} µs",
            self.kind, self.candidates, self.mean_micros, self.median_micros)
    }
}

/// A failed measurement: the candidate label and the error message
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkFailure {
    pub name: String,
    pub error: String,
}

/// A validation benchmark over one cursor
pub struct Benchmark<'a, C: Cursor + ?Sized> {
    /// The database to benchmark against
    cursor: &'a mut C,
    /// How candidates are probed
    options: ValidationOptions,
    /// Results of benchmarks, in run order
    results: Vec<BenchmarkResult>,
    /// Candidates whose validation failed
    failures: Vec<BenchmarkFailure>,
}

impl<'a, C: Cursor + ?Sized> Benchmark<'a, C> {
    /// Create a new benchmark validating through `cursor`
    pub fn new(cursor: &'a mut C, options: ValidationOptions) -> Self {
        Benchmark {
            cursor,
            options,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Validate `candidate` once for its verdict, then `repetitions`
    /// more times under the clock.
    pub fn run(&mut self, candidate: &DependencyCandidate, repetitions: usize) -> Result<&BenchmarkResult> {
        let operations = repetitions.max(1);
        let valid = candidate.validate_with(&mut *self.cursor, &self.options)?;

        let start = Instant::now();
        candidate.validate_repeatedly_with(&mut *self.cursor, operations, &self.options)?;
        let duration = start.elapsed();

        let ops_per_second = operations as f64 / duration.as_secs_f64();
        let time_per_op_micros = duration.as_micros() as f64 / operations as f64;

        self.results.push(BenchmarkResult {
            name: candidate.label(),
            kind: candidate.kind(),
            valid,
            operations,
            duration,
            ops_per_second,
            time_per_op_micros,
        });

        Ok(&self.results[self.results.len() - 1])
    }

    /// Run every candidate. A failing candidate is logged and recorded,
    /// and does not stop the run.
    pub fn run_all(&mut self, candidates: &[DependencyCandidate], repetitions: usize) {
        info!("Benchmarking {} candidates with {} repetitions", candidates.len(), repetitions);

        for candidate in candidates {
            let outcome = self.run(candidate, repetitions).map(|_| ());
            if let Err(e) = outcome {
                warn!("Skipping {}: {}", candidate.label(), e);
                self.failures.push(BenchmarkFailure {
                    name: candidate.label(),
                    error: e.to_string(),
                });
            }
        }
    }

    /// Per-kind timing statistics, in kind order
    pub fn summaries(&self) -> Vec<KindSummary> {
        summarize(&self.results)
    }

    /// Print all benchmark results
    pub fn print_results(&self) {
        println!("\nBenchmark Results:");
        println!("==================");

        for result in &self.results {
            println!("{}", result);
        }
        for summary in self.summaries() {
            println!("{}", summary);
        }
    }

    /// Get all benchmark results
    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Get the candidates that could not be measured
    pub fn failures(&self) -> &[BenchmarkFailure] {
        &self.failures
    }
}

/// Group results by kind and compute mean and median time per validation
pub fn summarize(results: &[BenchmarkResult]) -> Vec<KindSummary> {
    let mut by_kind: BTreeMap<DependencyKind, Vec<f64>> = BTreeMap::new();
    for result in results {
        by_kind.entry(result.kind).or_default().push(result.time_per_op_micros);
    }

    by_kind
        .into_iter()
        .map(|(kind, mut times)| {
            times.sort_by(f64::total_cmp);
            let mean_micros = times.iter().sum::<f64>() / times.len() as f64;
            let mid = times.len() / 2;
            let median_micros = if times.len() % 2 == 0 {
                (times[mid - 1] + times[mid]) / 2.0
            } else {
                times[mid]
            };

            KindSummary {
                kind,
                candidates: times.len(),
                mean_micros,
                median_micros,
            }
        })
        .collect()
}
