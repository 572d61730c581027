//! Plant Placement & Compatibility Engine
//!
//! Decides whether a batch of plant entries can be added to a
//! capacity-constrained hydroponic growing system.
//!
//! Layout:
//! - `catalog`: plant type reference data and strongly typed ids
//! - `data`: catalog loading (JSON, CSV via Polars, bundled catalog)
//! - `system`: system snapshots, placed plants and batch entries
//! - `checks/`: capacity, quantity and compatibility checks
//! - `validator`: combines the checks into one decision
//! - `availability`, `planting`, `query`: selector support, harvest and care planning, catalog search
//! - `explanation/`: human-readable validation reports
//!
//! Every check is a pure function over an injected catalog and an immutable
//! snapshot, so the engine can be called from any number of threads.

pub mod catalog;
pub mod data;
pub mod system;
pub mod checks;
pub mod validator;
pub mod availability;
pub mod planting;
pub mod query;
pub mod explanation;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{
    CatalogError, Difficulty, MaintenanceSchedule, PlantCatalog, PlantType, PlantTypeId,
};
pub use data::{bundled_catalog, load_catalog};
pub use system::{PlacedPlant, PlantEntry, SystemSnapshot};
pub use checks::*;
pub use validator::{validate_combination, CombinationValidator, Decision, ValidationRequest, Violation};
pub use availability::{catalog_availability, plant_availability, PlantAvailability};
pub use planting::{
    next_maintenance, plan_plantings, MaintenanceDue, MaintenanceTask, PlannedPlanting,
};
pub use query::{search_plants, PlantFilters};
pub use explanation::{ReportGenerator, ValidationReport};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState, ServerConfig};
