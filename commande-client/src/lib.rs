//! Commande client - typed service layer for the order line API
//!
//! [`CommandeItemService`] wraps an [`HttpClient`] and turns the API's loosely
//! shaped JSON into the types of the `shared` crate, running client-side
//! validation before anything is written.

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod query;
pub mod service;

pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use service::CommandeItemService;

// Re-export shared types for convenience
pub use shared;
pub use shared::models::{CommandeItem, CommandeItemDraft, CommandeItemUpdate};
pub use shared::{CommandeItemFilters, ListParams, Page, ValidationReport};
