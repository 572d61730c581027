pub mod types;
pub mod fragments;
pub mod generator;
pub mod formatters;

pub use types::{
    BenefitCard, OverallExplanation, ReportFragment, Severity, ValidationReport, WarningCard,
};

pub use fragments::{
    generate_capacity_fragment, generate_compatibility_fragment, generate_quantity_fragment,
};

pub use generator::ReportGenerator;
pub use formatters::{JsonFormatter, MarkdownFormatter};
