use crate::explanation::types::ValidationReport;
use serde_json;

/// JSON formatter for validation reports
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format report as pretty-printed JSON
    pub fn format(report: &ValidationReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    /// Format report as compact JSON (no whitespace)
    pub fn format_compact(report: &ValidationReport) -> Result<String, serde_json::Error> {
        serde_json::to_string(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::garden_catalog;
    use crate::explanation::ReportGenerator;
    use crate::system::{PlantEntry, SystemSnapshot};

    fn sample_report() -> ValidationReport {
        let catalog = garden_catalog();
        let system = SystemSnapshot::with_counts(4, &[]);
        ReportGenerator::generate(&system, &[PlantEntry::new("tomato", 2)], &catalog)
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&sample_report()).unwrap();

        assert!(json.contains("\"accepted\": false"));
        assert!(json.contains("\"kind\": \"capacity_exceeded\""));
        assert!(json.contains("\"label\": \"Needs changes\""));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&sample_report()).unwrap();

        assert!(!json.contains("\n  "));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["capacity"]["shortfall"], 2);
    }
}
