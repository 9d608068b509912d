use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use depval::bench::{BenchmarkFailure, BenchmarkResult, KindSummary};
use depval::{DependencyCandidate, ValidationReport};
use crate::formatters::Formatter;

/// JSON formatter
pub struct JsonFormatter {
    /// Whether output is indented
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        JsonFormatter {
            pretty: true,
        }
    }

    /// Disable indentation
    #[allow(dead_code)]
    pub fn without_pretty() -> Self {
        JsonFormatter {
            pretty: false,
        }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }

    fn message(&self, key: &str, message: &str) -> String {
        let json_value = json!({ key: message });
        self.render(&json_value)
            .unwrap_or_else(|_| format!("{{\"{}\":\"{}\"}}", key, message))
    }
}

impl Formatter for JsonFormatter {
    fn format_candidates(&self, candidates: &[DependencyCandidate]) -> Result<String> {
        self.render(candidates)
    }

    fn format_report(&self, report: &ValidationReport) -> Result<String> {
        let mut counts = serde_json::Map::new();
        for (kind, kind_counts) in report.counts() {
            counts.insert(kind.to_string(), serde_json::to_value(kind_counts)?);
        }

        let json_value = json!({
            "report": report,
            "counts": counts,
        });
        self.render(&json_value)
    }

    fn format_benchmark(
        &self,
        results: &[BenchmarkResult],
        summaries: &[KindSummary],
        failures: &[BenchmarkFailure],
    ) -> Result<String> {
        let json_value = json!({
            "results": results,
            "summaries": summaries,
            "failures": failures,
        });
        self.render(&json_value)
    }

    fn format_error(&self, error: &str) -> String {
        self.message("error", error)
    }

    fn format_info(&self, info: &str) -> String {
        self.message("info", info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depval::OrderCandidate;

    #[test]
    fn test_candidates_json() {
        let formatter = JsonFormatter::without_pretty();
        let candidates = vec![DependencyCandidate::from(OrderCandidate::new("t", "a", "b"))];
        let rendered = formatter.format_candidates(&candidates).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["kind"], "OD");
        assert_eq!(parsed[0]["ordering_column"], "a");
    }

    #[test]
    fn test_error_json() {
        let formatter = JsonFormatter::without_pretty();
        assert_eq!(formatter.format_error("boom"), r#"{"error":"boom"}"#);
    }
}
