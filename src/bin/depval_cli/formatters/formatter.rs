use anyhow::Result;
use depval::bench::{BenchmarkFailure, BenchmarkResult, KindSummary};
use depval::{DependencyCandidate, ValidationReport};

/// Trait defining an output formatter
pub trait Formatter {
    /// Format a list of parsed candidates
    fn format_candidates(&self, candidates: &[DependencyCandidate]) -> Result<String>;

    /// Format the verdicts of a batch validation
    fn format_report(&self, report: &ValidationReport) -> Result<String>;

    /// Format validation timings
    fn format_benchmark(
        &self,
        results: &[BenchmarkResult],
        summaries: &[KindSummary],
        failures: &[BenchmarkFailure],
    ) -> Result<String>;

    /// Format an error message
    fn format_error(&self, error: &str) -> String;

    /// Format an informational message
    fn format_info(&self, info: &str) -> String;
}
