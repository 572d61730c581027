use crate::explanation::types::ValidationReport;

/// Markdown formatter for validation reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format report as markdown
    pub fn format(report: &ValidationReport) -> String {
        let mut md = String::with_capacity(1024);

        let mark = if report.overall.accepted { "✅" } else { "❌" };
        md.push_str(&format!("# {} {}\n\n", mark, report.overall.label));
        md.push_str(&format!("{}\n\n", report.overall.message));

        // Capacity
        let capacity = &report.capacity;
        md.push_str("## Capacity\n\n");
        md.push_str("| Capacity | Used | Remaining | Requested | Utilization after |\n");
        md.push_str("|----------|------|-----------|-----------|-------------------|\n");
        md.push_str(&format!(
            "| {} | {} | {} | {} | {:.1}% |\n\n",
            capacity.capacity,
            capacity.used,
            capacity.remaining,
            capacity.requested,
            capacity.utilization_after
        ));

        // Quantities
        if !report.quantities.is_empty() {
            md.push_str("## Quantities\n\n");
            md.push_str("| Plant | Placed | Requested | Maximum |\n");
            md.push_str("|-------|--------|-----------|---------|\n");
            for usage in &report.quantities {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    usage.plant_name, usage.existing, usage.requested, usage.max_quantity
                ));
            }
            md.push('\n');
        }

        if !report.decision.violations.is_empty() {
            md.push_str("## Violations\n\n");
            for message in report.decision.violation_messages() {
                md.push_str(&format!("- {}\n", message));
            }
            md.push('\n');
        }

        if !report.warnings.is_empty() {
            md.push_str("## Warnings\n\n");
            for warning in &report.warnings {
                md.push_str(&format!("{} **{}**\n\n", warning.icon, warning.message));
                md.push_str(&format!("{}\n\n", warning.detail));
                md.push_str(&format!("*Advice:* {}\n\n", warning.advice));
            }
        }

        if !report.benefits.is_empty() {
            md.push_str("## Benefits\n\n");
            for benefit in &report.benefits {
                md.push_str(&format!("### {}\n\n", benefit.title));
                md.push_str(&format!("{}  \n", benefit.message));
                md.push_str(&format!("{}\n\n", benefit.detail));
            }
        }

        md
    }
}
