//! Plant Catalog
//!
//! Immutable reference data for every plant type a growing system can hold:
//! spacing cost, quantity cap, growth duration, the companion and
//! incompatibility relations, and optional care intervals.
//!
//! The catalog is built once (see `data`) and passed by reference into every
//! check. Lookups go through `PlantTypeId` and return `Option`, so a missing
//! id is always an explicit branch.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use thiserror::Error;

/// Relation lists rarely exceed a handful of ids
pub type RelationList = SmallVec<[PlantTypeId; 4]>;

/// Strongly typed plant type identifier (e.g. "basil")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantTypeId(String);

impl PlantTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlantTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PlantTypeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlantTypeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlantTypeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Cultivation difficulty shown in the plant selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(CatalogError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Catalog entry for one plant type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantType {
    pub id: PlantTypeId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Capacity slots one unit occupies
    pub spacing: u32,
    /// Hard cap on simultaneous instances within one system
    pub max_quantity: u32,
    /// Days from planting to expected harvest
    pub growth_days: u32,
    #[serde(default)]
    pub companion_plants: RelationList,
    #[serde(default)]
    pub incompatible_plants: RelationList,
    /// Care intervals, when the catalog provides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_schedule: Option<MaintenanceSchedule>,
}

/// Recurring care intervals in days, counted from the planting date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    pub watering: u32,
    pub fertilizing: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pruning: Option<u32>,
}

impl MaintenanceSchedule {
    fn has_zero_interval(&self) -> bool {
        self.watering == 0 || self.fertilizing == 0 || self.pruning == Some(0)
    }
}

impl PlantType {
    /// Does this type list `other` in its own incompatibility list?
    pub fn lists_incompatible(&self, other: &PlantTypeId) -> bool {
        self.incompatible_plants.contains(other)
    }

    /// Does this type list `other` in its own companion list?
    pub fn lists_companion(&self, other: &PlantTypeId) -> bool {
        self.companion_plants.contains(other)
    }
}

/// Catalog construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate plant type id '{0}'")]
    DuplicateId(PlantTypeId),

    #[error("plant type '{0}' has zero spacing")]
    ZeroSpacing(PlantTypeId),

    #[error("plant type '{0}' has zero max quantity")]
    ZeroMaxQuantity(PlantTypeId),

    #[error("plant type '{0}' has zero growth days")]
    ZeroGrowthDays(PlantTypeId),

    #[error("plant types '{plant}' and '{other}' are listed as both companions and incompatible")]
    ConflictingRelation {
        plant: PlantTypeId,
        other: PlantTypeId,
    },

    #[error("plant type '{0}' has a zero-day maintenance interval")]
    ZeroMaintenanceInterval(PlantTypeId),

    #[error("plant type '{0}' lists itself as incompatible")]
    SelfIncompatible(PlantTypeId),

    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

/// Read-only lookup table of plant types, in load order
#[derive(Debug, Clone, Default)]
pub struct PlantCatalog {
    plants: Vec<PlantType>,
    index: FxHashMap<PlantTypeId, usize>,
}

impl PlantCatalog {
    /// Build a catalog, enforcing the per-type invariants
    pub fn new(plants: Vec<PlantType>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();
        index.reserve(plants.len());

        for (i, plant) in plants.iter().enumerate() {
            validate_plant(plant)?;
            if index.insert(plant.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(plant.id.clone()));
            }
        }

        // Relations are symmetric, so a companion must not list this plant back as incompatible
        for plant in &plants {
            for companion in &plant.companion_plants {
                if let Some(&j) = index.get(companion) {
                    if plants[j].lists_incompatible(&plant.id) {
                        return Err(CatalogError::ConflictingRelation {
                            plant: plant.id.clone(),
                            other: companion.clone(),
                        });
                    }
                }
            }
        }

        // Dangling relations are allowed; checks skip ids they cannot resolve
        for plant in &plants {
            for related in plant.companion_plants.iter().chain(plant.incompatible_plants.iter()) {
                if !index.contains_key(related) {
                    tracing::warn!(plant = %plant.id, related = %related, "relation references unknown plant type");
                }
            }
        }

        Ok(Self { plants, index })
    }

    /// Look up a plant type by id
    pub fn get<Q>(&self, id: &Q) -> Option<&PlantType>
    where
        PlantTypeId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(id).map(|&i| &self.plants[i])
    }

    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        PlantTypeId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(id)
    }

    /// Display name for an id, falling back to the raw id for unknown types
    pub fn display_name(&self, id: &PlantTypeId) -> String {
        self.get(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn plants(&self) -> &[PlantType] {
        &self.plants
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlantType> {
        self.plants.iter()
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

fn validate_plant(plant: &PlantType) -> Result<(), CatalogError> {
    if plant.spacing == 0 {
        return Err(CatalogError::ZeroSpacing(plant.id.clone()));
    }
    if plant.max_quantity == 0 {
        return Err(CatalogError::ZeroMaxQuantity(plant.id.clone()));
    }
    if plant.growth_days == 0 {
        return Err(CatalogError::ZeroGrowthDays(plant.id.clone()));
    }
    if plant.maintenance_schedule.is_some_and(|m| m.has_zero_interval()) {
        return Err(CatalogError::ZeroMaintenanceInterval(plant.id.clone()));
    }
    if plant.lists_incompatible(&plant.id) {
        return Err(CatalogError::SelfIncompatible(plant.id.clone()));
    }
    if let Some(other) = plant
        .companion_plants
        .iter()
        .find(|c| plant.incompatible_plants.contains(c))
    {
        return Err(CatalogError::ConflictingRelation {
            plant: plant.id.clone(),
            other: other.clone(),
        });
    }
    Ok(())
}

/// Small hand-built catalogs for unit tests
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn plant(
        id: &str,
        spacing: u32,
        max_quantity: u32,
        companions: &[&str],
        incompatible: &[&str],
    ) -> PlantType {
        PlantType {
            id: PlantTypeId::from(id),
            name: capitalize(id),
            category: "herbs".to_string(),
            difficulty: Difficulty::Easy,
            spacing,
            max_quantity,
            growth_days: 30,
            companion_plants: companions.iter().map(|&c| PlantTypeId::from(c)).collect(),
            incompatible_plants: incompatible.iter().map(|&c| PlantTypeId::from(c)).collect(),
            maintenance_schedule: None,
        }
    }

    fn capitalize(id: &str) -> String {
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// basil/tomato/lettuce/mint/pepper fixture
    ///
    /// tomato lists basil as incompatible, basil does not list tomato back.
    /// mint and pepper list each other.
    pub fn garden_catalog() -> PlantCatalog {
        PlantCatalog::new(vec![
            plant("basil", 2, 4, &["lettuce"], &[]),
            plant("tomato", 3, 4, &[], &["basil"]),
            plant("lettuce", 1, 10, &["basil"], &[]),
            plant("mint", 2, 2, &[], &["pepper"]),
            plant("pepper", 3, 3, &[], &["mint"]),
        ])
        .expect("fixture catalog is valid")
    }
}
