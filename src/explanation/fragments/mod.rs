pub mod capacity_fragment;
pub mod quantity_fragment;
pub mod compatibility_fragment;

pub use capacity_fragment::generate_capacity_fragment;
pub use quantity_fragment::generate_quantity_fragment;
pub use compatibility_fragment::generate_compatibility_fragment;
