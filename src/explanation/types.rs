use serde::{Deserialize, Serialize};
use crate::checks::{CapacitySummary, QuantityUsage};
use crate::validator::Decision;

/// Complete report for one batch against one system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub overall: OverallExplanation,
    pub decision: Decision,
    pub capacity: CapacitySummary,
    pub quantities: Vec<QuantityUsage>,
    pub benefits: Vec<BenefitCard>,
    pub warnings: Vec<WarningCard>,
}

/// Headline outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallExplanation {
    pub accepted: bool,
    pub label: String,   // "Ready to plant" / "Needs changes"
    pub message: String,
    pub units_requested: u32,
}

/// Advisory card for positive pairings (companions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitCard {
    pub benefit_type: String, // "companion_planting"
    pub title: String,
    pub message: String,
    pub detail: String,
}

/// Warning card for violations and softer notices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningCard {
    pub warning_type: String, // "capacity_exceeded", "quantity_limit", "incompatible_pair", "unknown_plant"
    pub severity: Severity,
    pub icon: String,
    pub message: String,
    pub detail: String,
    pub advice: String,
}

/// Severity level for warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Derive severity from post-batch utilization (percent of capacity)
    pub fn from_utilization(utilization: f64) -> Self {
        match utilization {
            u if u > 100.0 => Severity::High,
            u if u >= 90.0 => Severity::Low,
            _ => Severity::Info,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ️",
            Severity::Low => "⚡",
            Severity::Medium => "⚠️",
            Severity::High => "🚨",
        }
    }
}

/// Cards contributed by one check
#[derive(Debug, Clone, Default)]
pub struct ReportFragment {
    pub benefits: Vec<BenefitCard>,
    pub warnings: Vec<WarningCard>,
}

impl ReportFragment {
    /// Create an empty fragment
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a fragment with only a warning
    pub fn with_warning(warning: WarningCard) -> Self {
        Self {
            benefits: Vec::new(),
            warnings: vec![warning],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.benefits.is_empty() && self.warnings.is_empty()
    }

    pub fn merge(&mut self, other: ReportFragment) {
        self.benefits.extend(other.benefits);
        self.warnings.extend(other.warnings);
    }
}
