//! Data models
//!
//! Wire types of the order line API. IDs are API-issued uuid strings.

pub mod audit;
pub mod avis;
pub mod bulk;
pub mod commande_item;
pub mod promotion;
pub mod relations;
pub mod retour;
pub mod stats;

// Re-exports
pub use audit::*;
pub use avis::*;
pub use bulk::*;
pub use commande_item::*;
pub use promotion::*;
pub use relations::*;
pub use retour::*;
pub use stats::*;
