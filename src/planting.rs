//! Planting Planner
//!
//! Expands an accepted batch into one planned planting per unit, each with an
//! expected harvest date `growth_days` after planting. Entries with unknown
//! plant ids produce nothing.
//!
//! Placed plants with a care schedule also get their next watering,
//! fertilizing and pruning dates from `next_maintenance`.

use crate::catalog::{PlantCatalog, PlantType, PlantTypeId};
use crate::system::{PlacedPlant, PlantEntry};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A single unit ready to be recorded as placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPlanting {
    pub plant_type_id: PlantTypeId,
    pub name: String,
    pub planted_date: DateTime<Utc>,
    pub expected_harvest_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<PlannedPlanting> for PlacedPlant {
    fn from(planned: PlannedPlanting) -> Self {
        PlacedPlant {
            plant_type_id: planned.plant_type_id,
            planted_date: Some(planned.planted_date),
            expected_harvest_date: Some(planned.expected_harvest_date),
            notes: planned.notes,
        }
    }
}

/// planted_at + growth_days, clamped to the latest representable instant
pub fn expected_harvest_date(planted_at: DateTime<Utc>, growth_days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(growth_days))
        .and_then(|delta| planted_at.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceTask {
    Watering,
    Fertilizing,
    Pruning,
}

/// Next occurrence of a recurring care task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceDue {
    pub task: MaintenanceTask,
    pub interval_days: u32,
    pub next_date: DateTime<Utc>,
}

/// Next due date of each scheduled task for a placed plant
///
/// Tasks recur every `interval` days counted from the planting date. When a
/// task falls due today the next one is a full interval away. A plant without
/// a planting date or schedule has no tasks, and one planted in the future
/// gets its first tasks one interval after planting.
pub fn next_maintenance(
    placed: &PlacedPlant,
    plant_type: &PlantType,
    now: DateTime<Utc>,
) -> Vec<MaintenanceDue> {
    let (Some(planted), Some(schedule)) = (placed.planted_date, plant_type.maintenance_schedule)
    else {
        return Vec::new();
    };

    let tasks = [
        (MaintenanceTask::Watering, Some(schedule.watering)),
        (MaintenanceTask::Fertilizing, Some(schedule.fertilizing)),
        (MaintenanceTask::Pruning, schedule.pruning),
    ];

    tasks
        .into_iter()
        .filter_map(|(task, interval)| {
            let interval_days = interval.filter(|&days| days > 0)?;
            Some(MaintenanceDue {
                task,
                interval_days,
                next_date: next_due(planted, interval_days, now),
            })
        })
        .collect()
}

fn next_due(planted: DateTime<Utc>, interval_days: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    if now < planted {
        return expected_harvest_date(planted, interval_days);
    }

    let interval = i64::from(interval_days);
    let days_since = (now - planted).num_days();
    let days_until = interval - days_since % interval;

    TimeDelta::try_days(days_until)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// One planned planting per requested unit, in batch order
pub fn plan_plantings(
    entries: &[PlantEntry],
    catalog: &PlantCatalog,
    planted_at: DateTime<Utc>,
) -> Vec<PlannedPlanting> {
    let mut plantings = Vec::new();

    for entry in entries {
        let Some(plant) = catalog.get(&entry.plant_type_id) else {
            tracing::warn!(plant = %entry.plant_type_id, "skipping unknown plant type");
            continue;
        };
        let harvest = expected_harvest_date(planted_at, plant.growth_days);

        for _ in 0..entry.units() {
            plantings.push(PlannedPlanting {
                plant_type_id: plant.id.clone(),
                name: plant.name.clone(),
                planted_date: planted_at,
                expected_harvest_date: harvest,
                notes: entry.notes.clone(),
            });
        }
    }

    plantings
}
