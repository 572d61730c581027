//! Combination Validator - main coordinator for batch validation
//!
//! Runs the capacity, quantity and compatibility checks as independent
//! passes and collects every violation, so the caller can show every
//! problem at once. Validation never mutates the snapshot.

use crate::availability::{catalog_availability, PlantAvailability};
use crate::catalog::{PlantCatalog, PlantTypeId};
use crate::checks::*;
use crate::explanation::{ReportGenerator, ValidationReport};
use crate::planting::{plan_plantings, PlannedPlanting};
use crate::system::{PlacedPlant, PlantEntry, SystemSnapshot};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A named reason a batch cannot be accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    CapacityExceeded {
        required: u64,
        available: i64,
        shortfall: u64,
    },
    QuantityLimitExceeded {
        plant_type_id: PlantTypeId,
        plant_name: String,
        max_quantity: u32,
        existing: u32,
        requested: u32,
    },
    IncompatiblePair {
        first: PlantTypeId,
        first_name: String,
        second: PlantTypeId,
        second_name: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CapacityExceeded { required, available, shortfall } => write!(
                f,
                "Not enough space: {} slots required, {} available (short by {})",
                required, available, shortfall
            ),
            Violation::QuantityLimitExceeded { plant_name, max_quantity, existing, requested, .. } => write!(
                f,
                "Quantity limit exceeded for {}: maximum {} plants ({} placed, {} requested)",
                plant_name, max_quantity, existing, requested
            ),
            Violation::IncompatiblePair { first_name, second_name, .. } => {
                write!(f, "{} is incompatible with {}", first_name, second_name)
            }
        }
    }
}

/// Outcome of one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub accepted: bool,
    pub violations: Vec<Violation>,
    /// Batch ids missing from the catalog (reported, never a violation)
    #[serde(default)]
    pub unresolved: Vec<PlantTypeId>,
}

impl Decision {
    fn from_violations(violations: Vec<Violation>, unresolved: Vec<PlantTypeId>) -> Self {
        Self {
            accepted: violations.is_empty(),
            violations,
            unresolved,
        }
    }

    /// Human-readable violation list
    pub fn violation_messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }
}

/// Validate a batch against a system's capacity and placed plants
pub fn validate_combination(
    entries: &[PlantEntry],
    capacity: u32,
    placed: &[PlacedPlant],
    catalog: &PlantCatalog,
) -> Decision {
    let mut violations = Vec::new();

    // Capacity
    let requested_space = compute_requested_space(entries, catalog);
    let remaining_space = compute_remaining_space(capacity, placed, catalog);
    let shortfall = capacity_shortfall(requested_space, remaining_space);
    if shortfall > 0 {
        violations.push(Violation::CapacityExceeded {
            required: requested_space,
            available: remaining_space,
            shortfall,
        });
    }

    // Quantity (batch totals per type)
    for usage in quantity_usage(entries, placed, catalog) {
        if !check_quantity_limit(&usage.plant_type_id, usage.existing, usage.requested, catalog) {
            violations.push(Violation::QuantityLimitExceeded {
                plant_type_id: usage.plant_type_id,
                plant_name: usage.plant_name,
                max_quantity: usage.max_quantity,
                existing: usage.existing,
                requested: usage.requested,
            });
        }
    }

    // Compatibility
    let requested_types = distinct_resolved(entries.iter().map(|e| &e.plant_type_id), catalog);
    let placed_types = distinct_resolved(placed.iter().map(|p| &p.plant_type_id), catalog);
    for (first, second) in find_incompatible_pairs(&requested_types, &placed_types, catalog) {
        violations.push(Violation::IncompatiblePair {
            first: first.clone(),
            first_name: catalog.display_name(first),
            second: second.clone(),
            second_name: catalog.display_name(second),
        });
    }

    let unresolved = unresolved_ids(entries, catalog);

    tracing::debug!(
        entries = entries.len(),
        requested_space,
        remaining_space,
        violations = violations.len(),
        unresolved = unresolved.len(),
        "validated plant batch"
    );

    Decision::from_violations(violations, unresolved)
}

/// Distinct batch ids missing from the catalog, in first-appearance order
fn unresolved_ids(entries: &[PlantEntry], catalog: &PlantCatalog) -> Vec<PlantTypeId> {
    let mut unresolved: Vec<PlantTypeId> = Vec::new();
    for entry in entries {
        if !catalog.contains(&entry.plant_type_id) && !unresolved.contains(&entry.plant_type_id) {
            unresolved.push(entry.plant_type_id.clone());
        }
    }
    unresolved
}

/// One system snapshot plus the batch to validate against it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    #[serde(flatten)]
    pub system: SystemSnapshot,
    #[serde(default)]
    pub entries: Vec<PlantEntry>,
}

/// Validator bound to a shared catalog
///
/// Cheap to clone; every method borrows its inputs immutably.
#[derive(Debug, Clone)]
pub struct CombinationValidator {
    catalog: Arc<PlantCatalog>,
}

impl CombinationValidator {
    pub fn new(catalog: Arc<PlantCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PlantCatalog {
        &self.catalog
    }

    /// Validate one batch against one system
    pub fn validate(&self, system: &SystemSnapshot, entries: &[PlantEntry]) -> Decision {
        validate_combination(entries, system.capacity, &system.placed_plants, &self.catalog)
    }

    /// Validate independent requests IN PARALLEL
    ///
    /// Decisions come back in request order.
    pub fn validate_many(&self, requests: &[ValidationRequest]) -> Vec<Decision> {
        requests
            .par_iter()
            .map(|request| self.validate(&request.system, &request.entries))
            .collect()
    }

    /// Which catalog plants can currently be offered for this system
    pub fn availability(&self, system: &SystemSnapshot) -> Vec<PlantAvailability> {
        catalog_availability(system, &self.catalog)
    }

    /// Decision plus capacity, quantity and companion details
    pub fn report(&self, system: &SystemSnapshot, entries: &[PlantEntry]) -> ValidationReport {
        ReportGenerator::generate(system, entries, &self.catalog)
    }

    /// Validate, then plan the plantings of an accepted batch
    ///
    /// Rejected batches return their decision instead. The snapshot is never
    /// modified; recording the plantings is up to the caller.
    pub fn submit(
        &self,
        system: &SystemSnapshot,
        entries: &[PlantEntry],
        planted_at: DateTime<Utc>,
    ) -> Result<Vec<PlannedPlanting>, Decision> {
        let decision = self.validate(system, entries);
        if !decision.accepted {
            tracing::info!(violations = decision.violations.len(), "batch rejected");
            return Err(decision);
        }

        let plantings = plan_plantings(entries, &self.catalog, planted_at);
        tracing::info!(plantings = plantings.len(), "batch accepted");
        Ok(plantings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::garden_catalog;
    use chrono::TimeZone;

    fn basil_system() -> SystemSnapshot {
        SystemSnapshot::with_counts(10, &[("basil", 2)])
    }

    fn validate(system: &SystemSnapshot, entries: &[PlantEntry]) -> Decision {
        validate_combination(entries, system.capacity, &system.placed_plants, &garden_catalog())
    }

    #[test]
    fn test_empty_batch_is_accepted() {
        let decision = validate(&basil_system(), &[]);
        assert!(decision.accepted);
        assert!(decision.violations.is_empty());
        assert!(decision.unresolved.is_empty());
    }

    #[test]
    fn test_tomato_next_to_placed_basil() {
        let decision = validate(&basil_system(), &[PlantEntry::new("tomato", 2)]);

        assert!(!decision.accepted);
        assert_eq!(
            decision.violations,
            vec![Violation::IncompatiblePair {
                first: "tomato".into(),
                first_name: "Tomato".to_string(),
                second: "basil".into(),
                second_name: "Basil".to_string(),
            }]
        );
    }

    #[test]
    fn test_basil_over_cap() {
        let decision = validate(&basil_system(), &[PlantEntry::new("basil", 3)]);

        assert!(!decision.accepted);
        assert_eq!(decision.violations.len(), 1);
        assert!(matches!(
            &decision.violations[0],
            Violation::QuantityLimitExceeded { plant_type_id, max_quantity: 4, existing: 2, requested: 3, .. }
                if plant_type_id.as_str() == "basil"
        ));
    }

    #[test]
    fn test_quantity_decision_follows_limit_check() {
        let catalog = garden_catalog();
        let basil: PlantTypeId = "basil".into();
        let system = SystemSnapshot::with_counts(100, &[("basil", 2)]);

        for requested in 1..=4u32 {
            let decision = validate_combination(
                &[PlantEntry::new("basil", i64::from(requested))],
                system.capacity,
                &system.placed_plants,
                &catalog,
            );
            let within = check_quantity_limit(&basil, 2, requested, &catalog);
            assert_eq!(decision.accepted, within, "requested {}", requested);
        }
    }

    #[test]
    fn test_huge_requests_do_not_overflow() {
        let catalog = PlantCatalog::new(vec![crate::catalog::test_support::plant(
            "giant",
            u32::MAX,
            u32::MAX,
            &[],
            &[],
        )])
        .unwrap();
        let entries = vec![PlantEntry::new("giant", i64::MAX), PlantEntry::new("giant", i64::MAX)];

        let decision = validate_combination(&entries, u32::MAX, &[], &catalog);

        assert!(!decision.accepted);
        assert!(matches!(
            decision.violations[0],
            Violation::CapacityExceeded { required: u64::MAX, .. }
        ));
    }

    #[test]
    fn test_split_entries_still_hit_the_cap() {
        // basil headroom is 2; three entries of one unit each
        let entries = vec![
            PlantEntry::new("basil", 1),
            PlantEntry::new("basil", 1),
            PlantEntry::new("basil", 1),
        ];
        let decision = validate(&basil_system(), &entries);
        let quantity_violations = decision
            .violations
            .iter()
            .filter(|v| matches!(v, Violation::QuantityLimitExceeded { .. }))
            .count();
        assert_eq!(quantity_violations, 1);
    }

    #[test]
    fn test_single_capacity_violation_alongside_others() {
        let system = SystemSnapshot::with_counts(6, &[("basil", 2)]);
        let entries = vec![
            PlantEntry::new("tomato", 1),
            PlantEntry::new("tomato", 1),
            PlantEntry::new("basil", 5),
        ];
        let decision = validate(&system, &entries);

        let capacity: Vec<&Violation> = decision
            .violations
            .iter()
            .filter(|v| matches!(v, Violation::CapacityExceeded { .. }))
            .collect();
        assert_eq!(capacity.len(), 1);
        assert_eq!(
            capacity[0],
            &Violation::CapacityExceeded { required: 16, available: 2, shortfall: 14 }
        );
        // capacity first, then quantity, then compatibility
        assert!(matches!(decision.violations[0], Violation::CapacityExceeded { .. }));
        assert!(matches!(decision.violations[1], Violation::QuantityLimitExceeded { .. }));
        assert!(matches!(decision.violations[2], Violation::IncompatiblePair { .. }));
        assert_eq!(decision.violations.len(), 3);
    }

    #[test]
    fn test_same_type_repeated_is_accepted() {
        let system = SystemSnapshot::with_counts(10, &[]);
        let decision = validate(&system, &[PlantEntry::new("lettuce", 3)]);
        assert!(decision.accepted);

        let split = vec![PlantEntry::new("lettuce", 1), PlantEntry::new("lettuce", 2)];
        assert!(validate(&system, &split).accepted);
    }

    #[test]
    fn test_incompatible_pair_within_batch_reported_once() {
        let system = SystemSnapshot::with_counts(20, &[]);
        let entries = vec![
            PlantEntry::new("mint", 1),
            PlantEntry::new("pepper", 1),
            PlantEntry::new("mint", 1),
        ];
        let decision = validate(&system, &entries);
        assert_eq!(decision.violations.len(), 1);
        assert_eq!(
            decision.violation_messages(),
            vec!["Mint is incompatible with Pepper".to_string()]
        );
    }

    #[test]
    fn test_unknown_plants_are_reported_not_rejected() {
        let decision = validate(
            &basil_system(),
            &[PlantEntry::new("kale", 50), PlantEntry::new("lettuce", 1), PlantEntry::new("kale", 1)],
        );
        assert!(decision.accepted);
        assert_eq!(decision.unresolved, vec![PlantTypeId::from("kale")]);
    }

    #[test]
    fn test_violation_messages() {
        let decision = validate(&basil_system(), &[PlantEntry::new("basil", 3)]);
        assert_eq!(
            decision.violation_messages(),
            vec!["Quantity limit exceeded for Basil: maximum 4 plants (2 placed, 3 requested)".to_string()]
        );

        let capacity = Violation::CapacityExceeded { required: 9, available: 6, shortfall: 3 };
        assert_eq!(
            capacity.to_string(),
            "Not enough space: 9 slots required, 6 available (short by 3)"
        );
    }

    #[test]
    fn test_decision_serializes_with_kind_tag() {
        let decision = validate(&basil_system(), &[PlantEntry::new("tomato", 1)]);
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["accepted"], false);
        assert_eq!(json["violations"][0]["kind"], "incompatible_pair");
        assert_eq!(json["violations"][0]["first"], "tomato");
    }

    #[test]
    fn test_validate_many_preserves_order() {
        let validator = CombinationValidator::new(Arc::new(garden_catalog()));
        let requests = vec![
            ValidationRequest { system: basil_system(), entries: vec![PlantEntry::new("tomato", 1)] },
            ValidationRequest { system: basil_system(), entries: vec![PlantEntry::new("lettuce", 2)] },
            ValidationRequest { system: basil_system(), entries: vec![] },
        ];
        let decisions = validator.validate_many(&requests);
        let accepted: Vec<bool> = decisions.iter().map(|d| d.accepted).collect();
        assert_eq!(accepted, vec![false, true, true]);
    }

    #[test]
    fn test_request_deserializes_flat() {
        let request: ValidationRequest = serde_json::from_str(
            r#"{
                "capacity": 10,
                "placed_plants": [{"plant_type_id": "basil"}],
                "entries": [{"plant_type_id": "lettuce", "quantity": 2, "notes": "front row"}]
            }"#,
        )
        .unwrap();
        assert_eq!(request.system.capacity, 10);
        assert_eq!(request.system.placed_plants.len(), 1);
        assert_eq!(request.entries[0].notes.as_deref(), Some("front row"));
    }

    #[test]
    fn test_submit_plans_only_accepted_batches() {
        let validator = CombinationValidator::new(Arc::new(garden_catalog()));
        let planted_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        let rejected = validator.submit(&basil_system(), &[PlantEntry::new("tomato", 1)], planted_at);
        assert!(matches!(rejected, Err(ref d) if !d.accepted));

        let accepted = validator
            .submit(&basil_system(), &[PlantEntry::new("lettuce", 2)], planted_at)
            .unwrap();
        assert_eq!(accepted.len(), 2);
        assert!(accepted.iter().all(|p| p.planted_date == planted_at));
    }
}
