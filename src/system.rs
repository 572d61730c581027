//! System snapshots and batch entries
//!
//! A `SystemSnapshot` is the caller-owned view of one rented growing system:
//! its total capacity and the plants already in it. `PlantEntry` is one line
//! of a pending batch submission.

use crate::catalog::PlantTypeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A plant instance already growing in a system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPlant {
    pub plant_type_id: PlantTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_harvest_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlacedPlant {
    pub fn new(plant_type_id: impl Into<PlantTypeId>) -> Self {
        Self {
            plant_type_id: plant_type_id.into(),
            planted_date: None,
            expected_harvest_date: None,
            notes: None,
        }
    }
}

/// One request line of a batch: `quantity` units of a plant type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantEntry {
    pub plant_type_id: PlantTypeId,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

impl PlantEntry {
    pub fn new(plant_type_id: impl Into<PlantTypeId>, quantity: i64) -> Self {
        Self {
            plant_type_id: plant_type_id.into(),
            quantity,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Requested units; zero and negative quantities count as one
    pub fn units(&self) -> u32 {
        u32::try_from(self.quantity.max(1)).unwrap_or(u32::MAX)
    }
}

/// Immutable view of a system's capacity and current plants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Total capacity slots
    pub capacity: u32,
    #[serde(default)]
    pub placed_plants: Vec<PlacedPlant>,
}

impl SystemSnapshot {
    pub fn new(capacity: u32, placed_plants: Vec<PlacedPlant>) -> Self {
        Self { capacity, placed_plants }
    }

    /// Snapshot with `count` placed instances of each listed type
    pub fn with_counts(capacity: u32, counts: &[(&str, u32)]) -> Self {
        let placed_plants = counts
            .iter()
            .flat_map(|&(id, count)| (0..count).map(move |_| PlacedPlant::new(id)))
            .collect();
        Self { capacity, placed_plants }
    }
}
