//! Pre-flight validation
//!
//! Synchronous rules live in `shared::validation`. This adds the two
//! lookups that need the API: stock availability and applicable promotions.
//! Both are advisory: a failed lookup never blocks the draft.

use serde_json::Value;
use shared::models::{CommandeItemDraft, PromotionSuggestion, StockDisponibilite, TypeItem};
use shared::request::QueryPairs;
use shared::validation::check_draft;
use shared::{IssueCode, ValidationIssue, ValidationReport};
use tracing::{debug, instrument, warn};

use super::CommandeItemService;
use crate::normalize::{normalize_list, normalize_object};
use crate::query::{segment, with_query};
use crate::{ClientResult, HttpClient};

/// Product and quantity the lookups run for, when the draft qualifies
fn lookup_target(draft: &CommandeItemDraft) -> Option<(&str, i64)> {
    if draft.type_item != Some(TypeItem::Produit) {
        return None;
    }
    let produit_uuid = draft.reference("produit_uuid")?;
    let quantite = draft.quantite.filter(|q| *q > 0)?;
    Some((produit_uuid, quantite))
}

fn stock_unavailable() -> ValidationIssue {
    ValidationIssue::new(
        "quantite",
        IssueCode::StockCheckUnavailable,
        "stock availability could not be checked",
    )
}

impl<C: HttpClient> CommandeItemService<C> {
    /// Full validation report for a draft. Never fails.
    ///
    /// For product lines the stock and promotion lookups run concurrently.
    /// Insufficient stock is an error carrying the available quantity. A
    /// stock check that fails or returns no quantity is a warning. A failed
    /// promotion lookup only leaves `suggestions` empty.
    #[instrument(skip(self, draft), fields(type_item = ?draft.type_item))]
    pub async fn validate(&self, draft: &CommandeItemDraft) -> ValidationReport {
        let (errors, warnings) = check_draft(draft);
        let mut report = ValidationReport::new(errors, warnings, Vec::new());

        let Some((produit_uuid, quantite)) = lookup_target(draft) else {
            return report;
        };

        let (stock, promotions) = tokio::join!(
            self.stock_disponibilite(produit_uuid),
            self.promotions_applicables(produit_uuid, quantite),
        );

        match stock.map(|stock| stock.quantite_disponible) {
            Ok(Some(disponible)) if disponible < quantite => {
                report.push_error(ValidationIssue::new(
                    "quantite",
                    IssueCode::InsufficientStock,
                    format!("insufficient stock: {disponible} available, {quantite} requested"),
                ))
            }
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!(produit_uuid, "stock reply carried no available quantity");
                report.push_warning(stock_unavailable());
            }
            Err(e) => {
                warn!(produit_uuid, error = %e, "stock check unavailable");
                report.push_warning(stock_unavailable());
            }
        }

        match promotions {
            Ok(suggestions) => report.suggestions = suggestions,
            Err(e) => debug!(produit_uuid, error = %e, "promotion lookup failed"),
        }

        debug!(
            valid = report.is_valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            suggestions = report.suggestions.len(),
            "draft validated"
        );
        report
    }

    /// `GET stocks/produits/{uuid}/disponibilite`
    pub async fn stock_disponibilite(&self, produit_uuid: &str) -> ClientResult<StockDisponibilite> {
        let path = format!("stocks/produits/{}/disponibilite", segment(produit_uuid));
        let payload: Value = self.http.get(&path).await?;
        normalize_object(&payload)
    }

    /// `GET promotions/applicables?produit_uuid=..&quantite=..`
    pub async fn promotions_applicables(
        &self,
        produit_uuid: &str,
        quantite: i64,
    ) -> ClientResult<Vec<PromotionSuggestion>> {
        let pairs: QueryPairs = vec![
            ("produit_uuid", produit_uuid.to_string()),
            ("quantite", quantite.to_string()),
        ];
        let payload: Value = self.http.get(&with_query("promotions/applicables", &pairs)).await?;
        Ok(normalize_list(&payload)?.items)
    }
}
