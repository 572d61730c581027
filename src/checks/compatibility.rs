//! Compatibility Checker
//!
//! Incompatibility is a hard failure and symmetric: a pair is incompatible
//! when either side lists the other. Companionship is advisory only and
//! never blocks a batch. A type is always compatible with itself, and ids
//! missing from the catalog are skipped.

use crate::catalog::{PlantCatalog, PlantTypeId};
use smallvec::SmallVec;

/// Distinct ids in order of first appearance
pub type DistinctIds<'a> = SmallVec<[&'a PlantTypeId; 8]>;

/// Symmetric incompatibility between two types
pub fn are_incompatible(a: &PlantTypeId, b: &PlantTypeId, catalog: &PlantCatalog) -> bool {
    if a == b {
        return false;
    }
    match (catalog.get(a), catalog.get(b)) {
        (Some(plant_a), Some(plant_b)) => {
            plant_a.lists_incompatible(b) || plant_b.lists_incompatible(a)
        }
        _ => false,
    }
}

/// Symmetric companionship between two types (advisory)
pub fn are_companions(a: &PlantTypeId, b: &PlantTypeId, catalog: &PlantCatalog) -> bool {
    if a == b {
        return false;
    }
    match (catalog.get(a), catalog.get(b)) {
        (Some(plant_a), Some(plant_b)) => plant_a.lists_companion(b) || plant_b.lists_companion(a),
        _ => false,
    }
}

/// `true` unless the candidate is incompatible with any reference type
///
/// The reference set is the union of already-placed types and the other
/// types requested in the same batch.
pub fn check_compatibility<'r, I>(
    candidate: &PlantTypeId,
    reference_ids: I,
    catalog: &PlantCatalog,
) -> bool
where
    I: IntoIterator<Item = &'r PlantTypeId>,
{
    if !catalog.contains(candidate) {
        return true;
    }
    reference_ids
        .into_iter()
        .all(|other| !are_incompatible(candidate, other, catalog))
}

/// Distinct ids that resolve in the catalog, in first-appearance order
pub fn distinct_resolved<'a, I>(ids: I, catalog: &PlantCatalog) -> DistinctIds<'a>
where
    I: IntoIterator<Item = &'a PlantTypeId>,
{
    let mut distinct = DistinctIds::new();
    for id in ids {
        if catalog.contains(id) && !distinct.contains(&id) {
            distinct.push(id);
        }
    }
    distinct
}

/// Unordered pairs with at least one requested member
///
/// Order: each requested type in turn, paired first with the requested types
/// after it, then with placed types that are not also requested. The
/// requested member always comes first.
fn relevant_pairs<'a>(
    requested: &[&'a PlantTypeId],
    placed: &[&'a PlantTypeId],
) -> Vec<(&'a PlantTypeId, &'a PlantTypeId)> {
    let placed_only: DistinctIds<'a> = placed
        .iter()
        .copied()
        .filter(|id| !requested.contains(id))
        .collect();

    let mut pairs = Vec::new();
    for (i, &a) in requested.iter().enumerate() {
        for &b in &requested[i + 1..] {
            if a != b {
                pairs.push((a, b));
            }
        }
        for &b in &placed_only {
            pairs.push((a, b));
        }
    }
    pairs
}

/// Every incompatible pair, each unordered pair at most once
pub fn find_incompatible_pairs<'a>(
    requested: &[&'a PlantTypeId],
    placed: &[&'a PlantTypeId],
    catalog: &PlantCatalog,
) -> Vec<(&'a PlantTypeId, &'a PlantTypeId)> {
    relevant_pairs(requested, placed)
        .into_iter()
        .filter(|(a, b)| are_incompatible(a, b, catalog))
        .collect()
}

/// Every companion pair, each unordered pair at most once
pub fn find_companion_pairs<'a>(
    requested: &[&'a PlantTypeId],
    placed: &[&'a PlantTypeId],
    catalog: &PlantCatalog,
) -> Vec<(&'a PlantTypeId, &'a PlantTypeId)> {
    relevant_pairs(requested, placed)
        .into_iter()
        .filter(|(a, b)| are_companions(a, b, catalog))
        .collect()
}
