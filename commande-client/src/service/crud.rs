// commande-client/src/service/crud.rs
// CRUD operations on order lines

use serde_json::{Value, json};
use shared::models::{CommandeItem, CommandeItemDraft, CommandeItemUpdate, StatutUpdate};
use shared::validation::into_create;
use shared::{IssueCode, ListParams, Page, ValidationIssue, ValidationReport};
use tracing::{debug, info, instrument};

use super::{CommandeItemService, ITEMS_PATH, item_path, item_subpath};
use crate::normalize::{normalize_list, normalize_single};
use crate::query::with_query;
use crate::{ClientError, ClientResult, HttpClient};

const ENTITY: &str = "commande item";

impl<C: HttpClient> CommandeItemService<C> {
    // ========================================================================
    // Reads
    // ========================================================================

    /// One page of order lines. Empty or unrecognized payloads give an empty page.
    #[instrument(skip(self, params), fields(page = params.page(), limit = params.limit()))]
    pub async fn list(&self, params: &ListParams) -> ClientResult<Page<CommandeItem>> {
        let path = with_query(ITEMS_PATH, &params.to_query_pairs());
        let payload: Value = self.http.get(&path).await?;
        let page = normalize_list(&payload)?;
        debug!(count = page.count, total = page.total, "listed order lines");
        Ok(page)
    }

    /// Lines of one order; any `commande_uuid` already in `params` is replaced.
    pub async fn list_by_commande(
        &self,
        commande_uuid: &str,
        mut params: ListParams,
    ) -> ClientResult<Page<CommandeItem>> {
        params.filters.commande_uuid = Some(commande_uuid.to_string());
        self.list(&params).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, uuid: &str) -> ClientResult<CommandeItem> {
        let payload: Value = self.http.get(&item_path(uuid)).await?;
        normalize_single(&payload, ENTITY)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Validate, then create.
    ///
    /// Nothing is sent when the report carries errors; the whole report comes
    /// back in [`ClientError::Validation`]. Warnings do not block.
    #[instrument(skip(self, draft), fields(type_item = ?draft.type_item))]
    pub async fn create(&self, draft: &CommandeItemDraft) -> ClientResult<CommandeItem> {
        let report = self.validate(draft).await;
        if !report.is_valid {
            debug!(errors = report.errors.len(), "draft rejected before sending");
            return Err(ClientError::Validation(report));
        }

        // Rules already passed above; only the payload is taken here.
        let payload = into_create(draft).map_err(|errors| {
            ClientError::Validation(ValidationReport::new(errors, report.warnings, Vec::new()))
        })?;

        let response: Value = self.http.post(ITEMS_PATH, &payload).await?;
        let item: CommandeItem = normalize_single(&response, ENTITY).map_err(|e| match e {
            ClientError::NotFound(_) => {
                ClientError::Creation("the API returned no created order line".to_string())
            }
            other => other,
        })?;

        info!(uuid = %item.uuid, commande_uuid = %item.commande_uuid, "order line created");
        Ok(item)
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, uuid: &str, update: &CommandeItemUpdate) -> ClientResult<CommandeItem> {
        let response: Value = self.http.put(&item_path(uuid), update).await?;
        let item = normalize_single(&response, ENTITY)?;
        info!("order line updated");
        Ok(item)
    }

    /// Move any of the three status tracks. At least one must be set.
    #[instrument(skip(self, update))]
    pub async fn update_statut(&self, uuid: &str, update: &StatutUpdate) -> ClientResult<CommandeItem> {
        if update.is_empty() {
            let mut report = ValidationReport::default();
            report.push_error(ValidationIssue::new(
                "statut",
                IssueCode::RequiredField,
                "at least one of statut, statut_livraison or statut_paiement is required",
            ));
            return Err(ClientError::Validation(report));
        }

        let response: Value = self.http.put(&item_subpath(uuid, "status"), update).await?;
        let item = normalize_single(&response, ENTITY)?;
        info!(statut = ?update.statut, livraison = ?update.statut_livraison, paiement = ?update.statut_paiement, "order line status changed");
        Ok(item)
    }

    /// Soft delete
    #[instrument(skip(self))]
    pub async fn delete(&self, uuid: &str) -> ClientResult<()> {
        let _: Value = self.http.delete(&item_path(uuid)).await?;
        info!("order line deleted");
        Ok(())
    }

    /// Undo a soft delete
    #[instrument(skip(self))]
    pub async fn restore(&self, uuid: &str) -> ClientResult<CommandeItem> {
        let response: Value = self.http.post(&item_subpath(uuid, "restore"), &json!({})).await?;
        let item = normalize_single(&response, ENTITY)?;
        info!("order line restored");
        Ok(item)
    }
}
