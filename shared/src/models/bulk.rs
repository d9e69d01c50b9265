//! Batch and bulk payloads

use serde::{Deserialize, Serialize};

use crate::serde_helpers::null_default;

use super::commande_item::{CommandeItemCreate, CommandeItemUpdate};

/// Several lines created for one order in a single call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCreateRequest {
    pub items: Vec<CommandeItemCreate>,
}

/// Same update applied to many lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    pub uuids: Vec<String>,
    pub updates: CommandeItemUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub uuids: Vec<String>,
}

/// Outcome of a bulk delete. Failures are reported per item by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkDeleteResult {
    #[serde(deserialize_with = "null_default")]
    pub deleted: u64,
    #[serde(deserialize_with = "null_default")]
    pub errors: Vec<String>,
}

impl BulkDeleteResult {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}
