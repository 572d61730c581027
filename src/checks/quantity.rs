//! Quantity Limiter
//!
//! Counts existing instances per plant type and enforces `max_quantity`.
//! Requests for the same type are summed across the whole batch before the
//! comparison, so splitting one entry into many cannot slip past a cap.

use crate::catalog::{PlantCatalog, PlantType, PlantTypeId};
use crate::system::{PlacedPlant, PlantEntry};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Number of placed instances of one type
pub fn count_existing_quantity(plant_type_id: &PlantTypeId, placed: &[PlacedPlant]) -> u32 {
    let count = placed
        .iter()
        .filter(|p| &p.plant_type_id == plant_type_id)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// `true` while existing + requested stays within the type's cap
///
/// Unknown ids pass: they take no part in quantity math.
pub fn check_quantity_limit(
    plant_type_id: &PlantTypeId,
    existing: u32,
    requested: u32,
    catalog: &PlantCatalog,
) -> bool {
    match catalog.get(plant_type_id) {
        Some(plant) => u64::from(existing) + u64::from(requested) <= u64::from(plant.max_quantity),
        None => true,
    }
}

/// max_quantity − existing, or None for unknown ids
pub fn remaining_headroom(
    plant_type_id: &PlantTypeId,
    existing: u32,
    catalog: &PlantCatalog,
) -> Option<u32> {
    catalog
        .get(plant_type_id)
        .map(|plant| plant.max_quantity.saturating_sub(existing))
}

/// Batch total for one resolved plant type
#[derive(Debug, Clone, Copy)]
pub struct RequestedTotal<'a> {
    pub plant: &'a PlantType,
    pub requested: u32,
}

/// Sum requested units per resolved type, in first-appearance order
pub fn aggregate_requested<'a>(
    entries: &[PlantEntry],
    catalog: &'a PlantCatalog,
) -> Vec<RequestedTotal<'a>> {
    let mut totals: Vec<RequestedTotal<'a>> = Vec::new();
    let mut positions: FxHashMap<&'a PlantTypeId, usize> = FxHashMap::default();

    for entry in entries {
        let Some(plant) = catalog.get(&entry.plant_type_id) else {
            continue;
        };
        match positions.get(&plant.id) {
            Some(&pos) => {
                totals[pos].requested = totals[pos].requested.saturating_add(entry.units());
            }
            None => {
                positions.insert(&plant.id, totals.len());
                totals.push(RequestedTotal { plant, requested: entry.units() });
            }
        }
    }

    totals
}

/// Existing vs. requested vs. cap for one plant type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUsage {
    pub plant_type_id: PlantTypeId,
    pub plant_name: String,
    pub existing: u32,
    pub requested: u32,
    pub max_quantity: u32,
}

impl QuantityUsage {
    pub fn exceeds(&self) -> bool {
        u64::from(self.existing) + u64::from(self.requested) > u64::from(self.max_quantity)
    }

    pub fn headroom(&self) -> u32 {
        self.max_quantity.saturating_sub(self.existing)
    }
}

/// Quantity usage for every distinct resolved type in the batch
pub fn quantity_usage(
    entries: &[PlantEntry],
    placed: &[PlacedPlant],
    catalog: &PlantCatalog,
) -> Vec<QuantityUsage> {
    aggregate_requested(entries, catalog)
        .into_iter()
        .map(|total| QuantityUsage {
            plant_type_id: total.plant.id.clone(),
            plant_name: total.plant.name.clone(),
            existing: count_existing_quantity(&total.plant.id, placed),
            requested: total.requested,
            max_quantity: total.plant.max_quantity,
        })
        .collect()
}
