//! Placement checks
//!
//! Each check lives in its own module and is a pure function over the
//! catalog and the caller's snapshot:
//! - `capacity`: requested vs. remaining slots
//! - `quantity`: per-type caps, aggregated across the whole batch
//! - `compatibility`: symmetric incompatibility and advisory companionship

pub mod capacity;
pub mod quantity;
pub mod compatibility;

// Re-export check functions
pub use capacity::{
    capacity_shortfall, compute_remaining_space, compute_requested_space, compute_used_space,
    CapacitySummary,
};
pub use quantity::{
    aggregate_requested, check_quantity_limit, count_existing_quantity, quantity_usage,
    remaining_headroom, QuantityUsage, RequestedTotal,
};
pub use compatibility::{
    are_companions, are_incompatible, check_compatibility, distinct_resolved,
    find_companion_pairs, find_incompatible_pairs,
};
