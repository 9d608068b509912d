use anyhow::Result;
use colored::*;
use depval::bench::{BenchmarkFailure, BenchmarkResult, KindSummary};
use depval::{DependencyCandidate, ValidationReport, Verdict};
use crate::formatters::Formatter;

/// Plain text formatter
pub struct TextFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        TextFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TextFormatter {
            colored: false,
        }
    }

    fn verdict(&self, verdict: &Verdict) -> String {
        let tag = format!("[{}]", verdict.as_str());
        if !self.colored {
            return tag;
        }
        match verdict {
            Verdict::Valid => tag.green().to_string(),
            Verdict::Invalid => tag.red().to_string(),
            Verdict::Failed(_) => tag.yellow().bold().to_string(),
        }
    }
}

impl Formatter for TextFormatter {
    fn format_candidates(&self, candidates: &[DependencyCandidate]) -> Result<String> {
        Ok(candidates
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn format_report(&self, report: &ValidationReport) -> Result<String> {
        let mut lines = Vec::with_capacity(report.outcomes.len() + 5);

        for outcome in &report.outcomes {
            let mut line = format!("{} {} ({} µs)",
                self.verdict(&outcome.verdict), outcome.candidate.label(), outcome.elapsed_micros);
            if let Verdict::Failed(error) = &outcome.verdict {
                line.push_str(&format!(": {}", error));
            }
            lines.push(line);
        }

        lines.push(String::new());
        for (kind, counts) in report.counts() {
            lines.push(format!("{}: {} valid, {} invalid, {} failed",
                kind, counts.valid, counts.invalid, counts.failed));
        }

        Ok(lines.join("\n"))
    }

    fn format_benchmark(
        &self,
        results: &[BenchmarkResult],
        summaries: &[KindSummary],
        failures: &[BenchmarkFailure],
    ) -> Result<String> {
        let mut lines: Vec<String> = results.iter().map(|r| r.to_string()).collect();

        lines.push(String::new());
        lines.extend(summaries.iter().map(|s| s.to_string()));

        for failure in failures {
            lines.push(self.format_error(&format!("{}: {}", failure.name, failure.error)));
        }

        Ok(lines.join("\n"))
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
    use depval::UniqueCandidate;

    #[test]
    fn test_candidates_plain() {
        let formatter = TextFormatter::without_colors();
        let candidates = vec![
            DependencyCandidate::from(UniqueCandidate::new("date_dim", "d_dow")),
            DependencyCandidate::from(UniqueCandidate::new("store", "s_store_sk")),
        ];
        assert_eq!(
            formatter.format_candidates(&candidates).unwrap(),
            "UCC date_dim.d_dow\nUCC store.s_store_sk"
        );
    }

    #[test]
    fn test_messages_plain() {
        let formatter = TextFormatter::without_colors();
        assert_eq!(formatter.format_error("boom"), "Error: boom");
        assert_eq!(formatter.format_info("hi"), "Info: hi");
    }
}
