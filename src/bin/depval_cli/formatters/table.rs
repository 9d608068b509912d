use anyhow::Result;
use colored::*;
use prettytable::{Table, Row, Cell};
use depval::bench::{BenchmarkFailure, BenchmarkResult, KindSummary};
use depval::{DependencyCandidate, ValidationReport, Verdict};
use crate::formatters::Formatter;

/// Table formatter
pub struct TableFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        TableFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TableFormatter {
            colored: false,
        }
    }

    fn header(names: &[&str]) -> Row {
        Row::new(names.iter().map(|name| Cell::new(name)).collect())
    }
}

impl Formatter for TableFormatter {
    fn format_candidates(&self, candidates: &[DependencyCandidate]) -> Result<String> {
        let mut table = Table::new();
        table.add_row(Self::header(&["#", "Kind", "Candidate"]));

        for (i, candidate) in candidates.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&i.to_string()),
                Cell::new(candidate.kind().token()),
                Cell::new(&candidate.to_string()),
            ]));
        }

        Ok(table.to_string())
    }

    fn format_report(&self, report: &ValidationReport) -> Result<String> {
        let mut table = Table::new();
        table.add_row(Self::header(&["Kind", "Candidate", "Verdict", "Time (µs)", "Error"]));

        for outcome in &report.outcomes {
            let error = match &outcome.verdict {
                Verdict::Failed(error) => error.as_str(),
                _ => "",
            };

            table.add_row(Row::new(vec![
                Cell::new(outcome.candidate.kind().token()),
                Cell::new(&outcome.candidate.to_string()),
                Cell::new(outcome.verdict.as_str()),
                Cell::new(&outcome.elapsed_micros.to_string()),
                Cell::new(error),
            ]));
        }

        let mut totals = Table::new();
        totals.add_row(Self::header(&["Kind", "Valid", "Invalid", "Failed"]));
        for (kind, counts) in report.counts() {
            totals.add_row(Row::new(vec![
                Cell::new(kind.token()),
                Cell::new(&counts.valid.to_string()),
                Cell::new(&counts.invalid.to_string()),
                Cell::new(&counts.failed.to_string()),
            ]));
        }

        Ok(format!("{}\n{}", table, totals))
    }

    fn format_benchmark(
        &self,
        results: &[BenchmarkResult],
        summaries: &[KindSummary],
        failures: &[BenchmarkFailure],
    ) -> Result<String> {
        let mut table = Table::new();
        table.add_row(Self::header(&["Candidate", "Valid", "Ops", "Ops/sec", "µs/op"]));

        for result in results {
            table.add_row(Row::new(vec![
                Cell::new(&result.name),
                Cell::new(&result.valid.to_string()),
                Cell::new(&result.operations.to_string()),
                Cell::new(&format!("{:.2}", result.ops_per_second)),
                Cell::new(&format!("{:.2}", result.time_per_op_micros)),
            ]));
        }

        let mut totals = Table::new();
        totals.add_row(Self::header(&["Kind", "Candidates", "Mean (µs)", "Median (µs)"]));
        for summary in summaries {
            totals.add_row(Row::new(vec![
                Cell::new(summary.kind.token()),
                Cell::new(&summary.candidates.to_string()),
                Cell::new(&format!("{:.2}", summary.mean_micros)),
                Cell::new(&format!("{:.2}", summary.median_micros)),
            ]));
        }

        let mut output = format!("{}\n{}", table, totals);
        for failure in failures {
            output.push('\n');
            output.push_str(&self.format_error(&format!("{}: {}", failure.name, failure.error)));
        }
        Ok(output)
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depval::InclusionCandidate;

    #[test]
    fn test_candidates_table() {
        let formatter = TableFormatter::without_colors();
        let candidates = vec![DependencyCandidate::from(
            InclusionCandidate::new("store_returns", "sr_store_sk", "store", "s_store_sk"),
        )];

        let rendered = formatter.format_candidates(&candidates).unwrap();
        assert!(rendered.contains("IND"));
        assert!(rendered.contains("store_returns.sr_store_sk |-> store.s_store_sk"));
    }
}
