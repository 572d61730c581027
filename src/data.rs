//! Catalog Data Loading
//!
//! Builds a validated `PlantCatalog` from:
//! - a JSON document `{ "plants": [...] }`
//! - a CSV table with pipe-separated relation lists, read with Polars
//! - the bundled hydroponic catalog (`data/plant_catalog.json`)

use crate::catalog::{
    Difficulty, MaintenanceSchedule, PlantCatalog, PlantType, PlantTypeId, RelationList,
};
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Catalog shipped with the crate
pub const BUNDLED_CATALOG_JSON: &str = include_str!("../data/plant_catalog.json");

/// Required CSV columns; `category`, `difficulty`, the relation columns and the
/// maintenance interval columns (`watering_days`, `fertilizing_days`,
/// `pruning_days`) are optional
pub const REQUIRED_CSV_COLS: &[&str] = &[
    "id",
    "name",
    "spacing",
    "max_quantity",
    "growth_days",
];

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    plants: Vec<PlantType>,
}

/// Load a catalog file, choosing the format by extension (`.csv` or JSON)
pub fn load_catalog(path: &Path) -> Result<PlantCatalog> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_catalog_csv(path)
    } else {
        load_catalog_json(path)
    }
}

/// The bundled hydroponic catalog
pub fn bundled_catalog() -> Result<PlantCatalog> {
    parse_catalog_json(BUNDLED_CATALOG_JSON).context("Bundled plant catalog is invalid")
}

pub fn load_catalog_json(path: &Path) -> Result<PlantCatalog> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plant catalog: {:?}", path))?;

    let catalog = parse_catalog_json(&contents)
        .with_context(|| format!("Invalid plant catalog: {:?}", path))?;

    tracing::info!("Loaded {} plant types from {:?}", catalog.len(), path);
    Ok(catalog)
}

pub fn parse_catalog_json(contents: &str) -> Result<PlantCatalog> {
    let document: CatalogDocument = serde_json::from_str(contents)
        .with_context(|| "Failed to parse plant catalog JSON")?;

    Ok(PlantCatalog::new(document.plants)?)
}

/// Serialize a catalog back into the JSON document format
pub fn catalog_to_json(catalog: &PlantCatalog) -> Result<String> {
    let document = CatalogDocument {
        plants: catalog.plants().to_vec(),
    };
    serde_json::to_string_pretty(&document).context("Failed to serialize plant catalog")
}

/// Load a catalog from CSV
///
/// Example row: `basil,Basil,herbs,easy,1,8,60,tomato|pepper,sage`
pub fn load_catalog_csv(path: &Path) -> Result<PlantCatalog> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load plant catalog CSV: {:?}", path))?;

    let plants = plants_from_frame(&df)
        .with_context(|| format!("Invalid plant catalog CSV: {:?}", path))?;
    let catalog = PlantCatalog::new(plants)?;

    tracing::info!("Loaded {} plant types from {:?}", catalog.len(), path);
    Ok(catalog)
}

fn plants_from_frame(df: &DataFrame) -> Result<Vec<PlantType>> {
    for &expected in REQUIRED_CSV_COLS {
        if df.column(expected).is_err() {
            anyhow::bail!("Missing expected column '{}'", expected);
        }
    }

    let ids = string_values(df, "id")?;
    let names = string_values(df, "name")?;
    let categories = optional_string_values(df, "category")?;
    let difficulties = optional_string_values(df, "difficulty")?;
    let spacings = integer_values(df, "spacing")?;
    let max_quantities = integer_values(df, "max_quantity")?;
    let growth_days = integer_values(df, "growth_days")?;
    let companions = optional_string_values(df, "companion_plants")?;
    let incompatibles = optional_string_values(df, "incompatible_plants")?;
    let watering = optional_integer_values(df, "watering_days")?;
    let fertilizing = optional_integer_values(df, "fertilizing_days")?;
    let pruning = optional_integer_values(df, "pruning_days")?;

    let mut plants = Vec::with_capacity(df.height());

    for row in 0..df.height() {
        let id = ids[row]
            .clone()
            .filter(|s| !s.trim().is_empty())
            .with_context(|| format!("Row {}: missing plant id", row + 1))?;

        let difficulty = match difficulties[row].as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<Difficulty>()
                .with_context(|| format!("Row {} ('{}'): bad difficulty", row + 1, id))?,
            _ => Difficulty::default(),
        };

        let maintenance_schedule = match (watering[row], fertilizing[row]) {
            (Some(w), Some(f)) => Some(MaintenanceSchedule {
                watering: to_u32(Some(w), "watering_days", row, &id)?,
                fertilizing: to_u32(Some(f), "fertilizing_days", row, &id)?,
                pruning: pruning[row]
                    .map(|p| to_u32(Some(p), "pruning_days", row, &id))
                    .transpose()?,
            }),
            (None, None) if pruning[row].is_none() => None,
            _ => anyhow::bail!(
                "Row {} ('{}'): maintenance schedule needs both watering_days and fertilizing_days",
                row + 1,
                id
            ),
        };

        plants.push(PlantType {
            name: names[row].clone().unwrap_or_else(|| id.clone()),
            category: categories[row].clone().unwrap_or_default(),
            difficulty,
            spacing: to_u32(spacings[row], "spacing", row, &id)?,
            max_quantity: to_u32(max_quantities[row], "max_quantity", row, &id)?,
            growth_days: to_u32(growth_days[row], "growth_days", row, &id)?,
            companion_plants: split_relations(companions[row].as_deref()),
            incompatible_plants: split_relations(incompatibles[row].as_deref()),
            maintenance_schedule,
            id: PlantTypeId::from(id),
        });
    }

    Ok(plants)
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as text", name))?;

    let values = column
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))?;

    Ok(values.into_iter().map(|v| v.map(|s| s.to_string())).collect())
}

fn optional_string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    if df.column(name).is_err() {
        return Ok(vec![None; df.height()]);
    }
    string_values(df, name)
}

fn integer_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::Int64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;

    let values = column
        .i64()
        .with_context(|| format!("Column '{}' is not integer type", name))?;

    Ok(values.into_iter().collect())
}

fn optional_integer_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    if df.column(name).is_err() {
        return Ok(vec![None; df.height()]);
    }
    integer_values(df, name)
}

fn to_u32(value: Option<i64>, column: &str, row: usize, id: &str) -> Result<u32> {
    let value = value.with_context(|| format!("Row {} ('{}'): missing {}", row + 1, id, column))?;
    u32::try_from(value)
        .with_context(|| format!("Row {} ('{}'): {} out of range: {}", row + 1, id, column, value))
}

/// "basil|lettuce" → [basil, lettuce]
fn split_relations(raw: Option<&str>) -> RelationList {
    raw.map(|s| {
        s.split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PlantTypeId::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = bundled_catalog().expect("bundled catalog should parse");
        assert_eq!(catalog.len(), 15);
        let tomato = catalog.get("tomato").unwrap();
        assert_eq!(tomato.spacing, 4);
        assert_eq!(tomato.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_bundled_relations_resolve() {
        let catalog = bundled_catalog().unwrap();
        for plant in catalog.iter() {
            for related in plant.companion_plants.iter().chain(plant.incompatible_plants.iter()) {
                assert!(catalog.contains(related), "{} -> {}", plant.id, related);
            }
        }
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let catalog = parse_catalog_json(
            r#"{"plants": [{"id": "kale", "name": "Kale", "spacing": 2, "max_quantity": 4, "growth_days": 55}]}"#,
        )
        .unwrap();
        let kale = catalog.get("kale").unwrap();
        assert_eq!(kale.difficulty, Difficulty::Easy);
        assert!(kale.companion_plants.is_empty());
        assert!(kale.category.is_empty());
    }

    #[test]
    fn test_parse_json_rejects_invariant_breach() {
        let err = parse_catalog_json(
            r#"{"plants": [{"id": "kale", "name": "Kale", "spacing": 0, "max_quantity": 4, "growth_days": 55}]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::ZeroSpacing("kale".into()))
        );
    }

    #[test]
    fn test_parse_json_rejects_malformed() {
        assert!(parse_catalog_json("{\"plants\": 3}").is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let catalog = bundled_catalog().unwrap();
        let reparsed = parse_catalog_json(&catalog_to_json(&catalog).unwrap()).unwrap();
        assert_eq!(catalog.plants(), reparsed.plants());
    }

    #[test]
    fn test_parse_json_maintenance_schedule() {
        let catalog = bundled_catalog().unwrap();
        let basil = catalog.get("basil").unwrap().maintenance_schedule.unwrap();
        assert_eq!((basil.watering, basil.fertilizing, basil.pruning), (2, 14, Some(7)));
        assert_eq!(catalog.get("lettuce").unwrap().maintenance_schedule.unwrap().pruning, None);
        assert!(catalog.get("arugula").unwrap().maintenance_schedule.is_none());
    }

    fn write_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.csv", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_csv_maintenance_columns() {
        let path = write_csv(
            "maintenance_columns",
            "id,name,spacing,max_quantity,growth_days,watering_days,fertilizing_days,pruning_days\n\
             kale,Kale,2,4,55,2,14,\n\
             chard,Chard,2,4,50,,,\n",
        );
        let catalog = load_catalog_csv(&path).unwrap();
        fs::remove_file(&path).ok();

        let kale = catalog.get("kale").unwrap().maintenance_schedule.unwrap();
        assert_eq!((kale.watering, kale.fertilizing, kale.pruning), (2, 14, None));
        assert!(catalog.get("chard").unwrap().maintenance_schedule.is_none());
    }

    #[test]
    fn test_csv_rejects_incomplete_schedule() {
        let path = write_csv(
            "incomplete_schedule",
            "id,name,spacing,max_quantity,growth_days,watering_days,fertilizing_days\n\
             kale,Kale,2,4,55,2,\n",
        );
        let err = load_catalog_csv(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(format!("{:#}", err).contains("needs both watering_days and fertilizing_days"));
    }

    #[test]
    fn test_split_relations() {
        let relations = split_relations(Some("basil| lettuce||"));
        let ids: Vec<&str> = relations.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["basil", "lettuce"]);
        assert!(split_relations(None).is_empty());
        assert!(split_relations(Some("")).is_empty());
    }
}
