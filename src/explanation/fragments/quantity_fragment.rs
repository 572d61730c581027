use crate::checks::QuantityUsage;
use crate::explanation::types::{ReportFragment, Severity, WarningCard};

/// Generate report fragment for per-type quantity caps
///
/// Types over their cap get a high-severity warning; types the batch fills
/// exactly to the cap get a low-severity notice.
pub fn generate_quantity_fragment(usages: &[QuantityUsage]) -> ReportFragment {
    let mut fragment = ReportFragment::empty();

    for usage in usages {
        let total = u64::from(usage.existing) + u64::from(usage.requested);

        if usage.exceeds() {
            let severity = Severity::High;
            fragment.warnings.push(WarningCard {
                warning_type: "quantity_limit".to_string(),
                severity,
                icon: severity.icon().to_string(),
                message: format!(
                    "Quantity limit exceeded for {}: maximum {} plants",
                    usage.plant_name, usage.max_quantity
                ),
                detail: format!(
                    "{} already placed and {} requested in this batch ({} total).",
                    usage.existing, usage.requested, total
                ),
                advice: format!(
                    "Request at most {} more {}.",
                    usage.headroom(),
                    usage.plant_name
                ),
            });
        } else if total == u64::from(usage.max_quantity) {
            let severity = Severity::Low;
            fragment.warnings.push(WarningCard {
                warning_type: "quantity_at_limit".to_string(),
                severity,
                icon: severity.icon().to_string(),
                message: format!("{} will reach its limit of {}", usage.plant_name, usage.max_quantity),
                detail: "No further plants of this type can be added to the system.".to_string(),
                advice: "Consider a different variety for later sowings.".to_string(),
            });
        }
    }

    fragment
}
