//! Commande Item Model
//!
//! An order line. The wire format is flat; related fields are grouped here
//! into flattened value objects so that invalid combinations are harder to
//! build by hand.

use serde::{Deserialize, Serialize};

use super::relations::{AnnonceResume, BoutiqueResume, DonResume, EchangeResume, ProduitResume, PromotionResume};

// =============================================================================
// Item source (polymorphic reference)
// =============================================================================

/// Kind of thing an order line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeItem {
    Produit,
    Annonce,
    Don,
    Echange,
    Service,
    Abonnement,
    Frais,
}

impl TypeItem {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeItem::Produit => "produit",
            TypeItem::Annonce => "annonce",
            TypeItem::Don => "don",
            TypeItem::Echange => "echange",
            TypeItem::Service => "service",
            TypeItem::Abonnement => "abonnement",
            TypeItem::Frais => "frais",
        }
    }

    /// Name of the `*_uuid` field that must be set for this type, if any
    pub fn reference_field(&self) -> Option<&'static str> {
        match self {
            TypeItem::Produit => Some("produit_uuid"),
            TypeItem::Annonce => Some("annonce_uuid"),
            TypeItem::Don => Some("don_uuid"),
            TypeItem::Echange => Some("echange_uuid"),
            TypeItem::Service | TypeItem::Abonnement | TypeItem::Frais => None,
        }
    }
}

impl std::fmt::Display for TypeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the line was bought from, keyed by `type_item` on the wire.
///
/// Each variant carries only its own reference, so an item can never point
/// at a `don` while claiming to be a `produit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type_item", rename_all = "snake_case")]
pub enum ItemSource {
    Produit { produit_uuid: String },
    Annonce { annonce_uuid: String },
    Don { don_uuid: String },
    Echange { echange_uuid: String },
    Service,
    Abonnement,
    Frais,
}

impl ItemSource {
    pub fn type_item(&self) -> TypeItem {
        match self {
            ItemSource::Produit { .. } => TypeItem::Produit,
            ItemSource::Annonce { .. } => TypeItem::Annonce,
            ItemSource::Don { .. } => TypeItem::Don,
            ItemSource::Echange { .. } => TypeItem::Echange,
            ItemSource::Service => TypeItem::Service,
            ItemSource::Abonnement => TypeItem::Abonnement,
            ItemSource::Frais => TypeItem::Frais,
        }
    }

    /// The referenced uuid, for the four referencing kinds
    pub fn reference_uuid(&self) -> Option<&str> {
        match self {
            ItemSource::Produit { produit_uuid } => Some(produit_uuid),
            ItemSource::Annonce { annonce_uuid } => Some(annonce_uuid),
            ItemSource::Don { don_uuid } => Some(don_uuid),
            ItemSource::Echange { echange_uuid } => Some(echange_uuid),
            ItemSource::Service | ItemSource::Abonnement | ItemSource::Frais => None,
        }
    }

    pub fn produit_uuid(&self) -> Option<&str> {
        match self {
            ItemSource::Produit { produit_uuid } => Some(produit_uuid),
            _ => None,
        }
    }
}

// =============================================================================
// Status tracks
// =============================================================================

/// Order line lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatutItem {
    #[default]
    EnAttente,
    Confirme,
    EnPreparation,
    Expedie,
    Livre,
    Annule,
    Retourne,
    Rembourse,
}

impl StatutItem {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatutItem::EnAttente => "en_attente",
            StatutItem::Confirme => "confirme",
            StatutItem::EnPreparation => "en_preparation",
            StatutItem::Expedie => "expedie",
            StatutItem::Livre => "livre",
            StatutItem::Annule => "annule",
            StatutItem::Retourne => "retourne",
            StatutItem::Rembourse => "rembourse",
        }
    }
}

impl std::fmt::Display for StatutItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shipping sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatutLivraison {
    NonExpedie,
    EnPreparation,
    Expedie,
    EnTransit,
    EnLivraison,
    Livre,
    EchecLivraison,
    Retourne,
}

impl StatutLivraison {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatutLivraison::NonExpedie => "non_expedie",
            StatutLivraison::EnPreparation => "en_preparation",
            StatutLivraison::Expedie => "expedie",
            StatutLivraison::EnTransit => "en_transit",
            StatutLivraison::EnLivraison => "en_livraison",
            StatutLivraison::Livre => "livre",
            StatutLivraison::EchecLivraison => "echec_livraison",
            StatutLivraison::Retourne => "retourne",
        }
    }
}

impl std::fmt::Display for StatutLivraison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatutPaiement {
    EnAttente,
    Paye,
    PartiellementPaye,
    Rembourse,
    PartiellementRembourse,
    Echoue,
    Annule,
}

impl StatutPaiement {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatutPaiement::EnAttente => "en_attente",
            StatutPaiement::Paye => "paye",
            StatutPaiement::PartiellementPaye => "partiellement_paye",
            StatutPaiement::Rembourse => "rembourse",
            StatutPaiement::PartiellementRembourse => "partiellement_rembourse",
            StatutPaiement::Echoue => "echoue",
            StatutPaiement::Annule => "annule",
        }
    }
}

impl std::fmt::Display for StatutPaiement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Value objects
// =============================================================================

/// Tax breakdown. Derived from price and rate, never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxes {
    /// VAT rate in percent (e.g. 20.0 = 20%)
    pub taux_tva: Option<f64>,
    pub montant_tva: Option<f64>,
    pub prix_unitaire_ht: Option<f64>,
    pub prix_unitaire_ttc: Option<f64>,
    pub prix_total_ht: Option<f64>,
    pub prix_total_ttc: Option<f64>,
}

/// A discount is either a percentage or a fixed amount, never both
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reduction {
    #[serde(rename = "reduction_pourcentage")]
    Pourcentage(f64),
    #[serde(rename = "reduction_montant")]
    Montant(f64),
}

/// Promotion block as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionInfo {
    pub promotion_uuid: Option<String>,
    pub reduction_pourcentage: Option<f64>,
    pub reduction_montant: Option<f64>,
    /// Line total before any discount
    pub prix_initial: Option<f64>,
    pub est_en_promotion: bool,
}

impl PromotionInfo {
    /// Percentage wins if the API ever sends both.
    pub fn reduction(&self) -> Option<Reduction> {
        match (self.reduction_pourcentage, self.reduction_montant) {
            (Some(p), _) => Some(Reduction::Pourcentage(p)),
            (None, Some(m)) => Some(Reduction::Montant(m)),
            (None, None) => None,
        }
    }
}

/// Weight, dimensions and shipment tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logistique {
    /// kg
    pub poids: Option<f64>,
    /// cm
    pub longueur: Option<f64>,
    pub largeur: Option<f64>,
    pub hauteur: Option<f64>,
    pub volume: Option<f64>,
    pub numero_suivi: Option<String>,
    pub transporteur: Option<String>,
    pub url_suivi: Option<String>,
}

/// Return and warranty terms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolitiqueRetour {
    pub accepte_retour: bool,
    /// Days
    pub delai_retour: Option<u32>,
    pub garantie: Option<String>,
}

// =============================================================================
// Entity
// =============================================================================

/// Order line entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandeItem {
    pub uuid: String,
    pub commande_uuid: String,
    #[serde(flatten)]
    pub source: ItemSource,
    pub libelle: Option<String>,
    pub quantite: u32,
    pub prix_unitaire: f64,
    pub prix_total: f64,
    pub devise: String,
    #[serde(flatten)]
    pub taxes: Taxes,
    #[serde(flatten)]
    pub promotion: PromotionInfo,
    #[serde(default)]
    pub statut: StatutItem,
    pub statut_livraison: Option<StatutLivraison>,
    pub statut_paiement: Option<StatutPaiement>,
    #[serde(flatten)]
    pub logistique: Logistique,
    pub boutique_uuid: Option<String>,
    pub vendeur_uuid: Option<String>,
    #[serde(flatten)]
    pub politique: PolitiqueRetour,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,

    // Hydrated relations (read-only)
    #[serde(default, skip_serializing)]
    pub produit: Option<ProduitResume>,
    #[serde(default, skip_serializing)]
    pub annonce: Option<AnnonceResume>,
    #[serde(default, skip_serializing)]
    pub don: Option<DonResume>,
    #[serde(default, skip_serializing)]
    pub echange: Option<EchangeResume>,
    #[serde(default, skip_serializing, rename = "promotion")]
    pub promotion_detail: Option<PromotionResume>,
    #[serde(default, skip_serializing)]
    pub boutique: Option<BoutiqueResume>,
}

impl CommandeItem {
    pub fn type_item(&self) -> TypeItem {
        self.source.type_item()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// True once the return window is still open relative to `days_since_delivery`
    pub fn retour_possible(&self, days_since_delivery: u32) -> bool {
        self.politique.accepte_retour
            && self
                .politique
                .delai_retour
                .is_none_or(|delai| days_since_delivery <= delai)
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Raw creation input, as a form submits it.
///
/// Every field is optional so that incomplete input can be validated and
/// reported in full. Turn it into a [`CommandeItemCreate`] with
/// [`crate::validation::into_create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandeItemDraft {
    pub commande_uuid: Option<String>,
    pub type_item: Option<TypeItem>,
    pub produit_uuid: Option<String>,
    pub annonce_uuid: Option<String>,
    pub don_uuid: Option<String>,
    pub echange_uuid: Option<String>,
    pub libelle: Option<String>,
    /// Signed so that zero and negative input reach validation
    pub quantite: Option<i64>,
    pub prix_unitaire: Option<f64>,
    pub devise: Option<String>,
    pub taux_tva: Option<f64>,
    pub promotion_uuid: Option<String>,
    pub reduction_pourcentage: Option<f64>,
    pub reduction_montant: Option<f64>,
    pub boutique_uuid: Option<String>,
    pub vendeur_uuid: Option<String>,
    pub poids: Option<f64>,
    pub accepte_retour: Option<bool>,
    pub delai_retour: Option<u32>,
    pub garantie: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl CommandeItemDraft {
    /// Value of the `*_uuid` field named by `field`
    pub fn reference(&self, field: &str) -> Option<&str> {
        let value = match field {
            "produit_uuid" => &self.produit_uuid,
            "annonce_uuid" => &self.annonce_uuid,
            "don_uuid" => &self.don_uuid,
            "echange_uuid" => &self.echange_uuid,
            _ => return None,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Typed creation payload sent to the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandeItemCreate {
    pub commande_uuid: String,
    #[serde(flatten)]
    pub source: ItemSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libelle: Option<String>,
    pub quantite: u32,
    pub prix_unitaire: f64,
    pub prix_total: f64,
    pub devise: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taux_tva: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub montant_tva: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prix_total_ht: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prix_total_ttc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_uuid: Option<String>,
    #[serde(flatten)]
    pub reduction: Option<Reduction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prix_initial: Option<f64>,
    pub est_en_promotion: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boutique_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendeur_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poids: Option<f64>,
    pub accepte_retour: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delai_retour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garantie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Partial update payload. Unset fields are left untouched by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandeItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libelle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantite: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prix_unitaire: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taux_tva: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_pourcentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_montant: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<StatutItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut_livraison: Option<StatutLivraison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut_paiement: Option<StatutPaiement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_suivi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporteur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_suivi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepte_retour: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delai_retour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garantie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Status change on any of the three tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatutUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<StatutItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut_livraison: Option<StatutLivraison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut_paiement: Option<StatutPaiement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
}

impl StatutUpdate {
    pub fn is_empty(&self) -> bool {
        self.statut.is_none() && self.statut_livraison.is_none() && self.statut_paiement.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_item() -> serde_json::Value {
        json!({
            "uuid": "it-1",
            "commande_uuid": "cmd-1",
            "type_item": "produit",
            "produit_uuid": "p-1",
            "annonce_uuid": null,
            "don_uuid": null,
            "echange_uuid": null,
            "quantite": 2,
            "prix_unitaire": 12.5,
            "prix_total": 25,
            "devise": "XOF",
            "taux_tva": 18,
            "reduction_pourcentage": null,
            "reduction_montant": 5,
            "est_en_promotion": true,
            "statut": "livre",
            "statut_livraison": "livre",
            "statut_paiement": "paye",
            "numero_suivi": "TRK-9",
            "accepte_retour": true,
            "delai_retour": 14,
            "produit": { "uuid": "p-1", "nom": "Panier tressé" },
            "created_at": "2024-03-01T10:00:00Z"
        })
    }

    #[test]
    fn test_decode_flat_wire_item() {
        let item: CommandeItem = serde_json::from_value(wire_item()).unwrap();
        assert_eq!(
            item.source,
            ItemSource::Produit {
                produit_uuid: "p-1".to_string()
            }
        );
        assert_eq!(item.type_item(), TypeItem::Produit);
        assert_eq!(item.quantite, 2);
        assert_eq!(item.prix_total, 25.0);
        assert_eq!(item.taxes.taux_tva, Some(18.0));
        assert_eq!(item.promotion.reduction(), Some(Reduction::Montant(5.0)));
        assert_eq!(item.statut, StatutItem::Livre);
        assert_eq!(item.statut_paiement, Some(StatutPaiement::Paye));
        assert_eq!(item.logistique.numero_suivi.as_deref(), Some("TRK-9"));
        assert!(item.politique.accepte_retour);
        assert_eq!(item.produit.as_ref().map(|p| p.nom.as_str()), Some("Panier tressé"));
        assert!(!item.is_deleted());
    }

    #[test]
    fn test_unit_variant_source() {
        let mut wire = wire_item();
        wire["type_item"] = json!("frais");
        let item: CommandeItem = serde_json::from_value(wire).unwrap();
        assert_eq!(item.source, ItemSource::Frais);
        assert_eq!(item.source.reference_uuid(), None);
    }

    #[test]
    fn test_reference_must_match_type() {
        let mut wire = wire_item();
        wire["type_item"] = json!("don");
        // don_uuid is null, so the don variant cannot be built
        assert!(serde_json::from_value::<CommandeItem>(wire).is_err());
    }

    #[test]
    fn test_relations_not_written_back() {
        let item: CommandeItem = serde_json::from_value(wire_item()).unwrap();
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["type_item"], "produit");
        assert_eq!(out["produit_uuid"], "p-1");
        assert!(out.get("produit").is_none());
        assert!(out.get("boutique").is_none());
    }

    #[test]
    fn test_create_payload_is_flat() {
        let create = CommandeItemCreate {
            commande_uuid: "cmd-1".into(),
            source: ItemSource::Annonce {
                annonce_uuid: "a-1".into(),
            },
            libelle: None,
            quantite: 1,
            prix_unitaire: 100.0,
            prix_total: 90.0,
            devise: "EUR".into(),
            taux_tva: None,
            montant_tva: None,
            prix_total_ht: None,
            prix_total_ttc: None,
            promotion_uuid: None,
            reduction: Some(Reduction::Pourcentage(10.0)),
            prix_initial: Some(100.0),
            est_en_promotion: true,
            boutique_uuid: None,
            vendeur_uuid: None,
            poids: None,
            accepte_retour: false,
            delai_retour: None,
            garantie: None,
            notes: None,
            tags: vec![],
        };
        let out = serde_json::to_value(&create).unwrap();
        assert_eq!(out["type_item"], "annonce");
        assert_eq!(out["annonce_uuid"], "a-1");
        assert_eq!(out["reduction_pourcentage"], 10.0);
        assert!(out.get("reduction_montant").is_none());
        assert!(out.get("tags").is_none());
    }

    #[test]
    fn test_retour_window() {
        let item: CommandeItem = serde_json::from_value(wire_item()).unwrap();
        assert!(item.retour_possible(14));
        assert!(!item.retour_possible(15));
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = CommandeItemUpdate {
            quantite: Some(3),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "quantite": 3 }));
    }
}
