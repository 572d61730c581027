use crate::catalog::{PlantCatalog, PlantTypeId};
use crate::explanation::types::{BenefitCard, ReportFragment, Severity, WarningCard};

/// Generate report fragment for pairwise relations
///
/// Incompatible pairs become high-severity warnings. Companion pairs become
/// benefit cards; they are advice only and never affect acceptance.
pub fn generate_compatibility_fragment(
    incompatible: &[(&PlantTypeId, &PlantTypeId)],
    companions: &[(&PlantTypeId, &PlantTypeId)],
    catalog: &PlantCatalog,
) -> ReportFragment {
    let mut fragment = ReportFragment::empty();

    for &(first, second) in incompatible {
        let (first_name, second_name) = (catalog.display_name(first), catalog.display_name(second));
        let severity = Severity::High;
        fragment.warnings.push(WarningCard {
            warning_type: "incompatible_pair".to_string(),
            severity,
            icon: severity.icon().to_string(),
            message: format!("{} is incompatible with {}", first_name, second_name),
            detail: format!(
                "{} and {} must not share a growing system.",
                first_name, second_name
            ),
            advice: format!("Grow {} in a different system.", first_name),
        });
    }

    for &(first, second) in companions {
        let (first_name, second_name) = (catalog.display_name(first), catalog.display_name(second));
        fragment.benefits.push(BenefitCard {
            benefit_type: "companion_planting".to_string(),
            title: "Companion Planting".to_string(),
            message: format!("{} grows well with {}", first_name, second_name),
            detail: "Companion plants support each other when they share a system.".to_string(),
        });
    }

    fragment
}
