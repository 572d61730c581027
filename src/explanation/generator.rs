use crate::catalog::PlantCatalog;
use crate::checks::{distinct_resolved, find_companion_pairs, find_incompatible_pairs, quantity_usage, CapacitySummary};
use crate::explanation::fragments::{
    generate_capacity_fragment, generate_compatibility_fragment, generate_quantity_fragment,
};
use crate::explanation::types::*;
use crate::system::{PlantEntry, SystemSnapshot};
use crate::validator::{validate_combination, Decision};

/// Main report generator
pub struct ReportGenerator;

impl ReportGenerator {
    /// Generate a complete report for one batch against one system
    ///
    /// The decision is the same one `validate_combination` returns; the cards
    /// add advisory detail on top of it.
    pub fn generate(
        system: &SystemSnapshot,
        entries: &[PlantEntry],
        catalog: &PlantCatalog,
    ) -> ValidationReport {
        let decision = validate_combination(entries, system.capacity, &system.placed_plants, catalog);
        let capacity = CapacitySummary::compute(system.capacity, &system.placed_plants, entries, catalog);
        let quantities = quantity_usage(entries, &system.placed_plants, catalog);

        let requested_types = distinct_resolved(entries.iter().map(|e| &e.plant_type_id), catalog);
        let placed_types = distinct_resolved(system.placed_plants.iter().map(|p| &p.plant_type_id), catalog);
        let incompatible = find_incompatible_pairs(&requested_types, &placed_types, catalog);
        let companions = find_companion_pairs(&requested_types, &placed_types, catalog);

        let mut report = ReportFragment::empty();
        report.merge(generate_capacity_fragment(&capacity));
        report.merge(generate_quantity_fragment(&quantities));
        report.merge(generate_compatibility_fragment(&incompatible, &companions, catalog));
        report.merge(Self::unknown_plant_fragment(&decision));

        // Most severe first; stable so check order is kept within a level
        report.warnings.sort_by(|a, b| b.severity.cmp(&a.severity));

        let units_requested = entries
            .iter()
            .fold(0u32, |acc, entry| acc.saturating_add(entry.units()));
        let overall = Self::generate_overall(&decision, units_requested);

        tracing::debug!(
            accepted = decision.accepted,
            warnings = report.warnings.len(),
            benefits = report.benefits.len(),
            "generated validation report"
        );

        ValidationReport {
            overall,
            decision,
            capacity,
            quantities,
            benefits: report.benefits,
            warnings: report.warnings,
        }
    }

    fn generate_overall(decision: &Decision, units_requested: u32) -> OverallExplanation {
        if decision.accepted {
            OverallExplanation {
                accepted: true,
                label: "Ready to plant".to_string(),
                message: format!("All {} plants fit this system", units_requested),
                units_requested,
            }
        } else {
            let count = decision.violations.len();
            OverallExplanation {
                accepted: false,
                label: "Needs changes".to_string(),
                message: format!(
                    "{} issue{} must be resolved before planting",
                    count,
                    if count == 1 { "" } else { "s" }
                ),
                units_requested,
            }
        }
    }

    fn unknown_plant_fragment(decision: &Decision) -> ReportFragment {
        let mut fragment = ReportFragment::empty();
        for id in &decision.unresolved {
            let severity = Severity::Medium;
            fragment.warnings.push(WarningCard {
                warning_type: "unknown_plant".to_string(),
                severity,
                icon: severity.icon().to_string(),
                message: format!("Unknown plant type '{}'", id),
                detail: "This plant is not in the catalog and was skipped by every check.".to_string(),
                advice: "Check the plant id against the catalog.".to_string(),
            });
        }
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::garden_catalog;

    #[test]
    fn test_accepted_report() {
        let catalog = garden_catalog();
        let system = SystemSnapshot::with_counts(10, &[("lettuce", 1)]);
        let entries = vec![PlantEntry::new("basil", 1)];

        let report = ReportGenerator::generate(&system, &entries, &catalog);

        assert!(report.overall.accepted);
        assert_eq!(report.overall.label, "Ready to plant");
        assert_eq!(report.capacity.requested, 2);
        assert_eq!(report.quantities.len(), 1);
        assert_eq!(report.benefits.len(), 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_rejected_report_orders_by_severity() {
        let catalog = garden_catalog();
        let system = SystemSnapshot::with_counts(10, &[("basil", 1)]);
        let entries = vec![PlantEntry::new("tomato", 1), PlantEntry::new("kale", 1)];

        let report = ReportGenerator::generate(&system, &entries, &catalog);

        assert!(!report.overall.accepted);
        assert_eq!(report.overall.message, "1 issue must be resolved before planting");
        assert_eq!(report.decision.unresolved.len(), 1);
        assert_eq!(report.warnings[0].warning_type, "incompatible_pair");
        assert_eq!(report.warnings.last().map(|w| w.warning_type.as_str()), Some("unknown_plant"));
    }

    #[test]
    fn test_report_matches_decision() {
        let catalog = garden_catalog();
        let system = SystemSnapshot::with_counts(10, &[("basil", 2)]);
        let entries = vec![PlantEntry::new("basil", 3)];

        let report = ReportGenerator::generate(&system, &entries, &catalog);
        let decision = validate_combination(&entries, 10, &system.placed_plants, &catalog);

        assert_eq!(report.decision, decision);
    }
}
