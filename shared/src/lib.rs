//! Shared types for the commande item API
//!
//! Wire models, list request types, the normalized page shape, validation
//! rules and money arithmetic. No I/O lives here.

pub mod models;
pub mod money;
pub mod request;
pub mod response;
pub mod serde_helpers;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use request::{CommandeItemFilters, ListParams, SortOrder};
pub use response::{Page, PageMeta};
pub use validation::{IssueCode, ValidationIssue, ValidationReport};
