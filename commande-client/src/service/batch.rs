// commande-client/src/service/batch.rs
// Multi-line operations

use serde_json::Value;
use shared::ValidationReport;
use shared::models::{
    BatchCreateRequest, BulkDeleteRequest, BulkDeleteResult, BulkUpdateRequest, CommandeItem,
    CommandeItemDraft,
};
use shared::validation::{ValidationIssue, check_draft, into_create};
use tracing::{debug, info, instrument, warn};

use super::{CommandeItemService, ITEMS_PATH};
use crate::normalize::{normalize_list, normalize_object};
use crate::query::segment;
use crate::{ClientError, ClientResult, HttpClient};

/// Prefix every issue field with the draft's position
fn at_index(index: usize, issues: Vec<ValidationIssue>) -> impl Iterator<Item = ValidationIssue> {
    issues.into_iter().map(move |mut issue| {
        issue.field = format!("items[{}].{}", index, issue.field);
        issue
    })
}

impl<C: HttpClient> CommandeItemService<C> {
    /// Create several lines of one order in a single request.
    ///
    /// Drafts without a `commande_uuid` inherit `commande_uuid`. Every draft is
    /// checked with the synchronous rules first; if any fails, nothing is sent
    /// and the report names the offending fields as `items[i].field`.
    #[instrument(skip(self, drafts), fields(count = drafts.len()))]
    pub async fn create_many(
        &self,
        commande_uuid: &str,
        drafts: &[CommandeItemDraft],
    ) -> ClientResult<Vec<CommandeItem>> {
        if drafts.is_empty() {
            debug!("no drafts, nothing to create");
            return Ok(Vec::new());
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut items = Vec::with_capacity(drafts.len());

        for (index, draft) in drafts.iter().enumerate() {
            let mut draft = draft.clone();
            if draft.commande_uuid.as_deref().is_none_or(|c| c.trim().is_empty()) {
                draft.commande_uuid = Some(commande_uuid.to_string());
            }
            let (draft_errors, draft_warnings) = check_draft(&draft);
            warnings.extend(at_index(index, draft_warnings));
            if !draft_errors.is_empty() {
                errors.extend(at_index(index, draft_errors));
                continue;
            }
            match into_create(&draft) {
                Ok(item) => items.push(item),
                Err(issues) => errors.extend(at_index(index, issues)),
            }
        }

        if !errors.is_empty() {
            debug!(errors = errors.len(), "batch rejected before sending");
            return Err(ClientError::Validation(ValidationReport::new(
                errors,
                warnings,
                Vec::new(),
            )));
        }

        let path = format!("commandes/{}/items/batch", segment(commande_uuid));
        let response: Value = self.http.post(&path, &BatchCreateRequest { items }).await?;
        let created = normalize_list::<CommandeItem>(&response)?.items;
        info!(created = created.len(), "order lines created in batch");
        Ok(created)
    }

    /// Apply the same partial update to several lines.
    ///
    /// Returns the lines the API reports as updated, possibly none.
    #[instrument(skip(self, request), fields(count = request.uuids.len()))]
    pub async fn bulk_update(&self, request: &BulkUpdateRequest) -> ClientResult<Vec<CommandeItem>> {
        if request.uuids.is_empty() {
            return Ok(Vec::new());
        }
        let path = format!("{}/bulk-update", ITEMS_PATH);
        let response: Value = self.http.post(&path, request).await?;
        let updated = normalize_list::<CommandeItem>(&response)?.items;
        info!(updated = updated.len(), "order lines updated in bulk");
        Ok(updated)
    }

    /// Delete several lines. Per-line failures are reported in the result,
    /// not as an error.
    #[instrument(skip(self, uuids), fields(count = uuids.len()))]
    pub async fn bulk_delete(&self, uuids: &[String]) -> ClientResult<BulkDeleteResult> {
        if uuids.is_empty() {
            return Ok(BulkDeleteResult::default());
        }
        let path = format!("{}/bulk-delete", ITEMS_PATH);
        let request = BulkDeleteRequest {
            uuids: uuids.to_vec(),
        };
        let response: Value = self.http.post(&path, &request).await?;
        let result: BulkDeleteResult = normalize_object(&response)?;
        if result.is_complete() {
            info!(deleted = result.deleted, "order lines deleted in bulk");
        } else {
            warn!(
                deleted = result.deleted,
                failed = result.errors.len(),
                "bulk delete partially failed"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::IssueCode;

    #[test]
    fn test_issue_fields_are_indexed() {
        let issues = vec![ValidationIssue::new("devise", IssueCode::RequiredField, "devise is required")];
        let indexed: Vec<_> = at_index(2, issues).collect();
        assert_eq!(indexed[0].field, "items[2].devise");
    }
}
