//! Capacity Calculator
//!
//! Space already used by placed plants, space requested by a batch, and the
//! remaining capacity of a system. Unresolved plant ids contribute zero; the
//! validator reports them separately.

use crate::catalog::PlantCatalog;
use crate::system::{PlacedPlant, PlantEntry};
use serde::{Deserialize, Serialize};

/// Σ spacing × quantity over the batch, saturating at `u64::MAX`
pub fn compute_requested_space(entries: &[PlantEntry], catalog: &PlantCatalog) -> u64 {
    entries
        .iter()
        .filter_map(|entry| {
            catalog
                .get(&entry.plant_type_id)
                .map(|plant| u64::from(plant.spacing) * u64::from(entry.units()))
        })
        .fold(0u64, u64::saturating_add)
}

/// Σ spacing over the placed plants
pub fn compute_used_space(placed: &[PlacedPlant], catalog: &PlantCatalog) -> u64 {
    placed
        .iter()
        .filter_map(|p| catalog.get(&p.plant_type_id).map(|plant| u64::from(plant.spacing)))
        .fold(0u64, u64::saturating_add)
}

/// capacity − used space
///
/// Signed: an inconsistent snapshot (over-filled system) yields a negative
/// value instead of wrapping.
pub fn compute_remaining_space(
    capacity: u32,
    placed: &[PlacedPlant],
    catalog: &PlantCatalog,
) -> i64 {
    let used = i64::try_from(compute_used_space(placed, catalog)).unwrap_or(i64::MAX);
    i64::from(capacity) - used
}

/// Slots missing for the request to fit (0 when it fits)
pub fn capacity_shortfall(requested: u64, remaining: i64) -> u64 {
    u64::try_from(i128::from(requested) - i128::from(remaining)).unwrap_or(0)
}

/// Capacity figures for one batch against one system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySummary {
    pub capacity: u32,
    pub used: u64,
    pub remaining: i64,
    pub requested: u64,
    pub shortfall: u64,
    /// Percentage of capacity occupied if the batch were accepted
    pub utilization_after: f64,
}

impl CapacitySummary {
    pub fn compute(
        capacity: u32,
        placed: &[PlacedPlant],
        entries: &[PlantEntry],
        catalog: &PlantCatalog,
    ) -> Self {
        let used = compute_used_space(placed, catalog);
        let remaining = compute_remaining_space(capacity, placed, catalog);
        let requested = compute_requested_space(entries, catalog);
        let occupied = used.saturating_add(requested);

        let utilization_after = if capacity == 0 {
            if occupied == 0 { 0.0 } else { 100.0 }
        } else {
            occupied as f64 / f64::from(capacity) * 100.0
        };

        Self {
            capacity,
            used,
            remaining,
            requested,
            shortfall: capacity_shortfall(requested, remaining),
            utilization_after,
        }
    }

    pub fn fits(&self) -> bool {
        self.shortfall == 0
    }
}
