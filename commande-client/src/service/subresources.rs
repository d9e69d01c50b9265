// commande-client/src/service/subresources.rs
// Child resources of an order line: returns, reviews, tracking, audit trails

use serde_json::Value;
use shared::models::{
    AvisCreate, CommandeItem, CommandeItemAvis, CommandeItemPriceHistory, CommandeItemRetour,
    CommandeItemStockMovement, NOTE_MAX, NOTE_MIN, RetourRequest, RetourStatusUpdate, StatutRetour,
    TrackingEvent, TrackingUpdate,
};
use shared::{IssueCode, ValidationIssue, ValidationReport};
use tracing::{info, instrument};

use super::{CommandeItemService, ITEMS_PATH, item_subpath};
use crate::normalize::{normalize_list, normalize_single};
use crate::query::segment;
use crate::{ClientError, ClientResult, HttpClient};

const RETOUR: &str = "return request";
const AVIS: &str = "review";

fn retours_path() -> String {
    format!("{}/retours", ITEMS_PATH)
}

fn retour_path(uuid: &str) -> String {
    format!("{}/{}", retours_path(), segment(uuid))
}

fn rejected(field: &str, message: String) -> ClientError {
    let mut report = ValidationReport::default();
    report.push_error(ValidationIssue::new(field, IssueCode::ValueOutOfRange, message));
    ClientError::Validation(report)
}

/// `NotFound` after a create means nothing was created
fn creation_error(e: ClientError, what: &str) -> ClientError {
    match e {
        ClientError::NotFound(_) => ClientError::Creation(format!("the API returned no created {}", what)),
        other => other,
    }
}

impl<C: HttpClient> CommandeItemService<C> {
    // ========================================================================
    // Returns
    // ========================================================================

    #[instrument(skip(self, request), fields(item_uuid = %request.item_uuid))]
    pub async fn request_retour(&self, request: &RetourRequest) -> ClientResult<CommandeItemRetour> {
        if request.quantite == 0 {
            return Err(rejected("quantite", "quantite must be greater than 0".to_string()));
        }
        let response: Value = self.http.post(&retours_path(), request).await?;
        let retour: CommandeItemRetour =
            normalize_single(&response, RETOUR).map_err(|e| creation_error(e, RETOUR))?;
        info!(uuid = %retour.uuid, "return requested");
        Ok(retour)
    }

    #[instrument(skip(self))]
    pub async fn get_retour(&self, uuid: &str) -> ClientResult<CommandeItemRetour> {
        let payload: Value = self.http.get(&retour_path(uuid)).await?;
        normalize_single(&payload, RETOUR)
    }

    #[instrument(skip(self))]
    pub async fn list_retours(&self, item_uuid: &str) -> ClientResult<Vec<CommandeItemRetour>> {
        let payload: Value = self.http.get(&item_subpath(item_uuid, "retours")).await?;
        Ok(normalize_list(&payload)?.items)
    }

    /// Raw status write. The API enforces the lifecycle;
    /// [`Self::transition_retour`] checks it locally first.
    #[instrument(skip(self, update), fields(statut = %update.statut))]
    pub async fn update_retour_status(
        &self,
        uuid: &str,
        update: &RetourStatusUpdate,
    ) -> ClientResult<CommandeItemRetour> {
        let path = format!("{}/status", retour_path(uuid));
        let response: Value = self.http.put(&path, update).await?;
        let retour = normalize_single(&response, RETOUR)?;
        info!("return status changed");
        Ok(retour)
    }

    /// Move a return to `next`, refusing illegal steps without a request.
    pub async fn transition_retour(
        &self,
        retour: &CommandeItemRetour,
        next: StatutRetour,
        notes_interne: Option<String>,
    ) -> ClientResult<CommandeItemRetour> {
        if !retour.statut.can_transition_to(next) {
            return Err(ClientError::InvalidTransition {
                from: retour.statut,
                to: next,
            });
        }
        let update = RetourStatusUpdate {
            statut: next,
            notes_interne,
        };
        self.update_retour_status(&retour.uuid, &update).await
    }

    // ========================================================================
    // Reviews
    // ========================================================================

    #[instrument(skip(self, avis), fields(note = avis.note))]
    pub async fn create_avis(&self, item_uuid: &str, avis: &AvisCreate) -> ClientResult<CommandeItemAvis> {
        if !avis.note_valide() {
            return Err(rejected(
                "note",
                format!("note must be between {} and {}, got {}", NOTE_MIN, NOTE_MAX, avis.note),
            ));
        }
        let response: Value = self.http.post(&item_subpath(item_uuid, "avis"), avis).await?;
        let created: CommandeItemAvis =
            normalize_single(&response, AVIS).map_err(|e| creation_error(e, AVIS))?;
        info!(uuid = %created.uuid, "review posted");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn list_avis(&self, item_uuid: &str) -> ClientResult<Vec<CommandeItemAvis>> {
        let payload: Value = self.http.get(&item_subpath(item_uuid, "avis")).await?;
        Ok(normalize_list(&payload)?.items)
    }

    // ========================================================================
    // Tracking
    // ========================================================================

    /// Shipment events, oldest first as the API sends them
    #[instrument(skip(self))]
    pub async fn get_tracking(&self, item_uuid: &str) -> ClientResult<Vec<TrackingEvent>> {
        let payload: Value = self.http.get(&item_subpath(item_uuid, "tracking")).await?;
        Ok(normalize_list(&payload)?.items)
    }

    #[instrument(skip(self, update))]
    pub async fn update_tracking(
        &self,
        item_uuid: &str,
        update: &TrackingUpdate,
    ) -> ClientResult<CommandeItem> {
        let response: Value = self.http.put(&item_subpath(item_uuid, "tracking"), update).await?;
        let item = normalize_single(&response, "commande item")?;
        info!("tracking updated");
        Ok(item)
    }

    // ========================================================================
    // Audit trails
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn price_history(&self, item_uuid: &str) -> ClientResult<Vec<CommandeItemPriceHistory>> {
        let payload: Value = self.http.get(&item_subpath(item_uuid, "price-history")).await?;
        Ok(normalize_list(&payload)?.items)
    }

    #[instrument(skip(self))]
    pub async fn stock_movements(&self, item_uuid: &str) -> ClientResult<Vec<CommandeItemStockMovement>> {
        let payload: Value = self.http.get(&item_subpath(item_uuid, "stock-movements")).await?;
        Ok(normalize_list(&payload)?.items)
    }
}
