//! Order line service
//!
//! One struct, with its operations split by concern:
//! - `crud`: list, get, create, update, status, delete, restore
//! - `validation`: pre-flight checks with stock and promotion lookups
//! - `batch`: multi-line create, bulk update and delete
//! - `subresources`: returns, reviews, tracking, audit trails
//! - `stats`: aggregates and time series
//!
//! Every response goes through [`crate::normalize`] before it reaches the
//! caller. Transport errors are propagated unchanged.

mod batch;
mod crud;
mod stats;
mod subresources;
mod validation;

use crate::HttpClient;
use crate::query::segment;

/// Collection path of the order line resource
pub(crate) const ITEMS_PATH: &str = "commandes/items";

/// Typed facade over the order line endpoints.
///
/// Holds nothing but the transport, so it is cheap to clone when `C` is and
/// can be shared across tasks.
///
/// # Example
///
/// ```no_run
/// use commande_client::{ClientConfig, CommandeItemService, ListParams};
///
/// # async fn example() -> Result<(), commande_client::ClientError> {
/// let http = ClientConfig::from_env().build_http_client()?;
/// let service = CommandeItemService::new(http);
///
/// let page = service.list(&ListParams::default()).await?;
/// println!("{} of {} items", page.count, page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CommandeItemService<C> {
    http: C,
}

impl<C: HttpClient> CommandeItemService<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Underlying transport
    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn into_inner(self) -> C {
        self.http
    }
}

/// `commandes/items/{uuid}`
pub(crate) fn item_path(uuid: &str) -> String {
    format!("{}/{}", ITEMS_PATH, segment(uuid))
}

/// `commandes/items/{uuid}/{suffix}`
pub(crate) fn item_subpath(uuid: &str, suffix: &str) -> String {
    format!("{}/{}", item_path(uuid), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(item_path("abc"), "commandes/items/abc");
        assert_eq!(item_subpath("abc", "avis"), "commandes/items/abc/avis");
        assert_eq!(item_path("a b"), "commandes/items/a%20b");
    }
}
