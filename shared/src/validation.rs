//! Client-side pre-flight validation of order lines
//!
//! Rules are evaluated independently and every violation is collected. The
//! API re-validates everything; this only saves obviously doomed requests.

use serde::{Deserialize, Serialize};

use crate::models::{
    CommandeItemCreate, CommandeItemDraft, ItemSource, PromotionSuggestion, Reduction, TypeItem,
};
use crate::money::compute_line_totals;

/// Quantities above this are accepted with a warning
pub const MAX_QUANTITE_HABITUELLE: i64 = 9999;

/// Largest unit price or discount amount accepted
pub const MAX_MONTANT: f64 = 1_000_000_000.0;

const REFERENCE_FIELDS: [&str; 4] = ["produit_uuid", "annonce_uuid", "don_uuid", "echange_uuid"];

/// What went wrong, for callers that branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    RequiredField,
    ValueOutOfRange,
    MissingReference,
    ReferenceMismatch,
    ConflictingDiscount,
    UnusualQuantity,
    InsufficientStock,
    StockCheckUnavailable,
}

/// One finding, tied to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    fn required(field: &str) -> Self {
        Self::new(field, IssueCode::RequiredField, format!("{field} is required"))
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Advisory outcome. Only `errors` block creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<PromotionSuggestion>,
}

impl ValidationReport {
    pub fn new(
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationIssue>,
        suggestions: Vec<PromotionSuggestion>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
        }
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
        self.is_valid = false;
    }

    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Synchronous rules. Returns `(errors, warnings)`.
pub fn check_draft(draft: &CommandeItemDraft) -> (Vec<ValidationIssue>, Vec<ValidationIssue>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if blank(&draft.commande_uuid) {
        errors.push(ValidationIssue::required("commande_uuid"));
    }

    match draft.type_item {
        None => errors.push(ValidationIssue::required("type_item")),
        Some(type_item) => {
            let expected = type_item.reference_field();
            if let Some(field) = expected
                && draft.reference(field).is_none()
            {
                errors.push(ValidationIssue::new(
                    field,
                    IssueCode::MissingReference,
                    format!("{field} is required for type_item '{type_item}'"),
                ));
            }
            for field in REFERENCE_FIELDS {
                if Some(field) != expected && draft.reference(field).is_some() {
                    errors.push(ValidationIssue::new(
                        field,
                        IssueCode::ReferenceMismatch,
                        format!("{field} does not match type_item '{type_item}'"),
                    ));
                }
            }
        }
    }

    match draft.quantite {
        None => errors.push(ValidationIssue::required("quantite")),
        Some(q) if q <= 0 => errors.push(ValidationIssue::new(
            "quantite",
            IssueCode::ValueOutOfRange,
            format!("quantite must be greater than 0, got {q}"),
        )),
        Some(q) if q > i64::from(u32::MAX) => errors.push(ValidationIssue::new(
            "quantite",
            IssueCode::ValueOutOfRange,
            format!("quantite is too large, got {q}"),
        )),
        Some(q) if q > MAX_QUANTITE_HABITUELLE => warnings.push(ValidationIssue::new(
            "quantite",
            IssueCode::UnusualQuantity,
            format!("quantite {q} is unusually high (above {MAX_QUANTITE_HABITUELLE})"),
        )),
        Some(_) => {}
    }

    match draft.prix_unitaire {
        None => errors.push(ValidationIssue::required("prix_unitaire")),
        Some(p) if !p.is_finite() || p < 0.0 => errors.push(ValidationIssue::new(
            "prix_unitaire",
            IssueCode::ValueOutOfRange,
            format!("prix_unitaire must be a non-negative number, got {p}"),
        )),
        Some(p) if p > MAX_MONTANT => errors.push(ValidationIssue::new(
            "prix_unitaire",
            IssueCode::ValueOutOfRange,
            format!("prix_unitaire exceeds maximum allowed ({MAX_MONTANT}), got {p}"),
        )),
        Some(_) => {}
    }

    if blank(&draft.devise) {
        errors.push(ValidationIssue::required("devise"));
    }

    if let Some(t) = draft.taux_tva
        && (!t.is_finite() || t < 0.0)
    {
        errors.push(ValidationIssue::new(
            "taux_tva",
            IssueCode::ValueOutOfRange,
            format!("taux_tva must be a non-negative number, got {t}"),
        ));
    }

    match (draft.reduction_pourcentage, draft.reduction_montant) {
        (Some(_), Some(_)) => errors.push(ValidationIssue::new(
            "reduction_montant",
            IssueCode::ConflictingDiscount,
            "reduction_pourcentage and reduction_montant are mutually exclusive",
        )),
        (Some(p), None) if !(0.0..=100.0).contains(&p) => errors.push(ValidationIssue::new(
            "reduction_pourcentage",
            IssueCode::ValueOutOfRange,
            format!("reduction_pourcentage must be between 0 and 100, got {p}"),
        )),
        (None, Some(m)) if !m.is_finite() || m < 0.0 => errors.push(ValidationIssue::new(
            "reduction_montant",
            IssueCode::ValueOutOfRange,
            format!("reduction_montant must be a non-negative number, got {m}"),
        )),
        (None, Some(m)) if m > MAX_MONTANT => errors.push(ValidationIssue::new(
            "reduction_montant",
            IssueCode::ValueOutOfRange,
            format!("reduction_montant exceeds maximum allowed ({MAX_MONTANT}), got {m}"),
        )),
        _ => {}
    }

    (errors, warnings)
}

/// Build the typed payload, with derived totals, from a draft.
///
/// Fails with the synchronous rule errors if the draft is not valid.
pub fn into_create(draft: &CommandeItemDraft) -> Result<CommandeItemCreate, Vec<ValidationIssue>> {
    let (errors, _) = check_draft(draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    // The rules above guarantee every unwrap_or_default below sees a value.
    let type_item = draft.type_item.unwrap_or(TypeItem::Frais);
    let reference = |field: &str| draft.reference(field).unwrap_or_default().to_string();
    let source = match type_item {
        TypeItem::Produit => ItemSource::Produit {
            produit_uuid: reference("produit_uuid"),
        },
        TypeItem::Annonce => ItemSource::Annonce {
            annonce_uuid: reference("annonce_uuid"),
        },
        TypeItem::Don => ItemSource::Don {
            don_uuid: reference("don_uuid"),
        },
        TypeItem::Echange => ItemSource::Echange {
            echange_uuid: reference("echange_uuid"),
        },
        TypeItem::Service => ItemSource::Service,
        TypeItem::Abonnement => ItemSource::Abonnement,
        TypeItem::Frais => ItemSource::Frais,
    };

    let quantite = u32::try_from(draft.quantite.unwrap_or_default()).unwrap_or_default();
    let prix_unitaire = draft.prix_unitaire.unwrap_or_default();
    let reduction = match (draft.reduction_pourcentage, draft.reduction_montant) {
        (Some(p), _) => Some(Reduction::Pourcentage(p)),
        (None, Some(m)) => Some(Reduction::Montant(m)),
        (None, None) => None,
    };
    let Some(totals) = compute_line_totals(quantite, prix_unitaire, draft.taux_tva, reduction) else {
        return Err(vec![ValidationIssue::new(
            "prix_unitaire",
            IssueCode::ValueOutOfRange,
            "line total is too large to compute",
        )]);
    };
    let promotion_uuid = draft.promotion_uuid.clone().filter(|p| !p.trim().is_empty());
    let est_en_promotion = reduction.is_some() || promotion_uuid.is_some();

    Ok(CommandeItemCreate {
        commande_uuid: draft.commande_uuid.clone().unwrap_or_default().trim().to_string(),
        source,
        libelle: draft.libelle.clone(),
        quantite,
        prix_unitaire,
        prix_total: totals.prix_total,
        devise: draft.devise.clone().unwrap_or_default().trim().to_string(),
        taux_tva: draft.taux_tva,
        montant_tva: draft.taux_tva.map(|_| totals.montant_tva),
        prix_total_ht: draft.taux_tva.map(|_| totals.prix_total_ht),
        prix_total_ttc: draft.taux_tva.map(|_| totals.prix_total_ttc),
        promotion_uuid,
        reduction,
        prix_initial: reduction.map(|_| totals.prix_initial),
        est_en_promotion,
        boutique_uuid: draft.boutique_uuid.clone(),
        vendeur_uuid: draft.vendeur_uuid.clone(),
        poids: draft.poids,
        accepte_retour: draft.accepte_retour.unwrap_or(false),
        delai_retour: draft.delai_retour,
        garantie: draft.garantie.clone(),
        notes: draft.notes.clone(),
        tags: draft.tags.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> CommandeItemDraft {
        CommandeItemDraft {
            commande_uuid: Some("cmd-1".into()),
            type_item: Some(TypeItem::Produit),
            produit_uuid: Some("p-1".into()),
            quantite: Some(2),
            prix_unitaire: Some(15.0),
            devise: Some("XOF".into()),
            ..Default::default()
        }
    }

    fn fields(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn test_valid_draft_has_no_findings() {
        let (errors, warnings) = check_draft(&valid_draft());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_all_errors_collected() {
        let draft = CommandeItemDraft {
            commande_uuid: Some("x".into()),
            type_item: Some(TypeItem::Produit),
            quantite: Some(0),
            prix_unitaire: Some(-5.0),
            devise: None,
            ..Default::default()
        };
        let (errors, _) = check_draft(&draft);
        let fields = fields(&errors);
        assert!(fields.contains(&"quantite"));
        assert!(fields.contains(&"prix_unitaire"));
        assert!(fields.contains(&"devise"));
        assert!(fields.contains(&"produit_uuid"));
        assert_eq!(errors.len(), 4);
        let missing = errors.iter().find(|e| e.field == "produit_uuid").unwrap();
        assert_eq!(missing.code, IssueCode::MissingReference);
    }

    #[test]
    fn test_empty_draft_reports_required_fields() {
        let (errors, _) = check_draft(&CommandeItemDraft::default());
        assert_eq!(
            fields(&errors),
            vec!["commande_uuid", "type_item", "quantite", "prix_unitaire", "devise"]
        );
        assert!(errors.iter().all(|e| e.code == IssueCode::RequiredField));
    }

    #[test]
    fn test_high_quantity_is_a_warning() {
        let draft = CommandeItemDraft {
            quantite: Some(50_000),
            ..valid_draft()
        };
        let (errors, warnings) = check_draft(&draft);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, IssueCode::UnusualQuantity);
    }

    #[test]
    fn test_foreign_reference_is_rejected() {
        let draft = CommandeItemDraft {
            don_uuid: Some("d-1".into()),
            ..valid_draft()
        };
        let (errors, _) = check_draft(&draft);
        assert_eq!(fields(&errors), vec!["don_uuid"]);
        assert_eq!(errors[0].code, IssueCode::ReferenceMismatch);
    }

    #[test]
    fn test_service_needs_no_reference() {
        let draft = CommandeItemDraft {
            type_item: Some(TypeItem::Service),
            produit_uuid: None,
            ..valid_draft()
        };
        assert!(check_draft(&draft).0.is_empty());
    }

    #[test]
    fn test_conflicting_discounts() {
        let draft = CommandeItemDraft {
            reduction_pourcentage: Some(10.0),
            reduction_montant: Some(2.0),
            ..valid_draft()
        };
        let (errors, _) = check_draft(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, IssueCode::ConflictingDiscount);
    }

    #[test]
    fn test_into_create_derives_totals() {
        let draft = CommandeItemDraft {
            taux_tva: Some(20.0),
            reduction_pourcentage: Some(50.0),
            prix_unitaire: Some(12.0),
            ..valid_draft()
        };
        let create = into_create(&draft).unwrap();
        assert_eq!(
            create.source,
            ItemSource::Produit {
                produit_uuid: "p-1".into()
            }
        );
        assert_eq!(create.quantite, 2);
        assert_eq!(create.prix_initial, Some(24.0));
        assert_eq!(create.prix_total, 12.0);
        assert_eq!(create.prix_total_ht, Some(10.0));
        assert_eq!(create.montant_tva, Some(2.0));
        assert!(create.est_en_promotion);
    }

    #[test]
    fn test_into_create_refuses_invalid_draft() {
        let errors = into_create(&CommandeItemDraft::default()).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_amounts_above_maximum_are_rejected() {
        let draft = CommandeItemDraft {
            type_item: Some(TypeItem::Frais),
            produit_uuid: None,
            quantite: Some(1),
            prix_unitaire: Some(1e27),
            reduction_pourcentage: Some(10.0),
            ..valid_draft()
        };
        let (errors, _) = check_draft(&draft);
        assert_eq!(fields(&errors), vec!["prix_unitaire"]);
        assert_eq!(errors[0].code, IssueCode::ValueOutOfRange);
        assert!(into_create(&draft).is_err());

        let draft = CommandeItemDraft {
            reduction_montant: Some(MAX_MONTANT * 10.0),
            ..valid_draft()
        };
        assert_eq!(fields(&check_draft(&draft).0), vec!["reduction_montant"]);
    }

    #[test]
    fn test_largest_amounts_still_build_a_payload() {
        let draft = CommandeItemDraft {
            quantite: Some(i64::from(u32::MAX)),
            prix_unitaire: Some(MAX_MONTANT),
            taux_tva: Some(18.0),
            reduction_pourcentage: Some(5.0),
            ..valid_draft()
        };
        let create = into_create(&draft).unwrap();
        assert!(create.prix_total > 0.0);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = ValidationReport::new(vec![], vec![], vec![]);
        let out = serde_json::to_value(&report).unwrap();
        assert_eq!(out["isValid"], true);
    }
}
