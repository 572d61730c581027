//! Catalog search
//!
//! Filters the catalog by category, difficulty, growth-time range and a
//! case-insensitive name search. Empty filter lists match everything.

use crate::catalog::{Difficulty, PlantCatalog, PlantType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantFilters {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub difficulty: Vec<Difficulty>,
    pub min_growth_days: Option<u32>,
    pub max_growth_days: Option<u32>,
    /// Matched against name and id
    pub search: Option<String>,

    // Pagination
    pub limit: Option<usize>,
}

impl PlantFilters {
    pub fn matches(&self, plant: &PlantType) -> bool {
        if !self.categories.is_empty()
            && !self.categories.iter().any(|c| c.eq_ignore_ascii_case(&plant.category))
        {
            return false;
        }
        if !self.difficulty.is_empty() && !self.difficulty.contains(&plant.difficulty) {
            return false;
        }
        if self.min_growth_days.is_some_and(|min| plant.growth_days < min) {
            return false;
        }
        if self.max_growth_days.is_some_and(|max| plant.growth_days > max) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                plant.name.to_lowercase().contains(&query)
                    || plant.id.as_str().to_lowercase().contains(&query)
            }
            _ => true,
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.difficulty.is_empty()
            || self.min_growth_days.is_some_and(|min| min > 0)
            || self.max_growth_days.is_some()
            || self.search.as_deref().is_some_and(|q| !q.trim().is_empty())
    }
}

/// Matching plants in catalog order, truncated to `limit`
pub fn search_plants<'a>(catalog: &'a PlantCatalog, filters: &PlantFilters) -> Vec<&'a PlantType> {
    catalog
        .iter()
        .filter(|plant| filters.matches(plant))
        .take(filters.limit.unwrap_or(usize::MAX))
        .collect()
}
