// commande-client/src/service/stats.rs
// Aggregates

use serde_json::Value;
use shared::CommandeItemFilters;
use shared::models::{AnalyticsPeriod, CommandeItemAnalytics, CommandeItemStats};
use shared::request::QueryPairs;
use tracing::instrument;

use super::{CommandeItemService, ITEMS_PATH};
use crate::normalize::normalize_object;
use crate::query::with_query;
use crate::{ClientResult, HttpClient};

impl<C: HttpClient> CommandeItemService<C> {
    /// Totals and breakdowns over the filtered lines.
    /// Fields the API leaves out read as zero or empty.
    #[instrument(skip(self, filters))]
    pub async fn get_stats(&self, filters: &CommandeItemFilters) -> ClientResult<CommandeItemStats> {
        let path = with_query(&format!("{}/stats", ITEMS_PATH), &filters.to_query_pairs());
        let payload: Value = self.http.get(&path).await?;
        normalize_object(&payload)
    }

    /// Time series over `period`, same defaults as [`Self::get_stats`].
    #[instrument(skip(self, filters), fields(period = %period))]
    pub async fn get_analytics(
        &self,
        period: AnalyticsPeriod,
        filters: &CommandeItemFilters,
    ) -> ClientResult<CommandeItemAnalytics> {
        let mut pairs: QueryPairs = vec![("period", period.as_str().to_string())];
        pairs.extend(filters.to_query_pairs());
        let path = with_query(&format!("{}/analytics", ITEMS_PATH), &pairs);
        let payload: Value = self.http.get(&path).await?;
        normalize_object(&payload)
    }
}
