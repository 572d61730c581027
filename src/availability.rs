//! Plant availability for the plant selector
//!
//! A plant can be offered for addition when it is compatible with every type
//! already placed, one unit fits in the remaining space, and its quantity cap
//! still has headroom. Batch-level interactions are left to the validator.

use crate::catalog::{PlantCatalog, PlantType, PlantTypeId};
use crate::checks::{
    check_compatibility, compute_remaining_space, count_existing_quantity, distinct_resolved,
};
use crate::system::SystemSnapshot;
use serde::{Deserialize, Serialize};

/// Selector state for one catalog plant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantAvailability {
    pub plant_type_id: PlantTypeId,
    pub name: String,
    pub compatible: bool,
    pub has_space: bool,
    pub under_limit: bool,
    pub available: bool,
    pub existing: u32,
    pub headroom: u32,
}

/// Availability of a single plant type in a system
pub fn plant_availability(
    plant: &PlantType,
    system: &SystemSnapshot,
    catalog: &PlantCatalog,
) -> PlantAvailability {
    let remaining = compute_remaining_space(system.capacity, &system.placed_plants, catalog);
    let placed_types = distinct_resolved(system.placed_plants.iter().map(|p| &p.plant_type_id), catalog);
    evaluate(plant, system, catalog, remaining, &placed_types)
}

/// Availability of every catalog plant, in catalog order
pub fn catalog_availability(system: &SystemSnapshot, catalog: &PlantCatalog) -> Vec<PlantAvailability> {
    let remaining = compute_remaining_space(system.capacity, &system.placed_plants, catalog);
    let placed_types = distinct_resolved(system.placed_plants.iter().map(|p| &p.plant_type_id), catalog);

    catalog
        .iter()
        .map(|plant| evaluate(plant, system, catalog, remaining, &placed_types))
        .collect()
}

fn evaluate(
    plant: &PlantType,
    system: &SystemSnapshot,
    catalog: &PlantCatalog,
    remaining: i64,
    placed_types: &[&PlantTypeId],
) -> PlantAvailability {
    let compatible = check_compatibility(&plant.id, placed_types.iter().copied(), catalog);
    let has_space = i64::from(plant.spacing) <= remaining;
    let existing = count_existing_quantity(&plant.id, &system.placed_plants);
    let under_limit = existing < plant.max_quantity;

    PlantAvailability {
        plant_type_id: plant.id.clone(),
        name: plant.name.clone(),
        compatible,
        has_space,
        under_limit,
        available: compatible && has_space && under_limit,
        existing,
        headroom: plant.max_quantity.saturating_sub(existing),
    }
}
