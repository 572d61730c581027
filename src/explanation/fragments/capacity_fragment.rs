use crate::checks::CapacitySummary;
use crate::explanation::types::{ReportFragment, Severity, WarningCard};

const NEARLY_FULL_PERCENT: f64 = 90.0;

/// Generate report fragment for the capacity check
///
/// A shortfall is a violation. A batch that fits but leaves the system at
/// 90% or more gets a low-severity notice.
pub fn generate_capacity_fragment(capacity: &CapacitySummary) -> ReportFragment {
    if !capacity.fits() {
        let severity = Severity::High;
        return ReportFragment::with_warning(WarningCard {
            warning_type: "capacity_exceeded".to_string(),
            severity,
            icon: severity.icon().to_string(),
            message: format!(
                "Not enough space: {} slots required, {} available",
                capacity.requested, capacity.remaining
            ),
            detail: format!(
                "The system has {} slots and {} are already occupied. This batch is {} slots short.",
                capacity.capacity, capacity.used, capacity.shortfall
            ),
            advice: "Reduce quantities or choose plants with smaller spacing.".to_string(),
        });
    }

    if capacity.requested > 0 && capacity.utilization_after >= NEARLY_FULL_PERCENT {
        let severity = Severity::from_utilization(capacity.utilization_after);
        return ReportFragment::with_warning(WarningCard {
            warning_type: "nearly_full".to_string(),
            severity,
            icon: severity.icon().to_string(),
            message: format!(
                "System will be {:.0}% full after planting",
                capacity.utilization_after
            ),
            detail: format!(
                "{} of {} slots will be occupied.",
                capacity.used.saturating_add(capacity.requested),
                capacity.capacity
            ),
            advice: "Leave room for successive sowings if you plan staggered harvests.".to_string(),
        });
    }

    ReportFragment::empty()
}
