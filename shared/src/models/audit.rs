// shared/src/models/audit.rs
// Append-only trails attached to an order line: stock movements, price
// history and shipment tracking events.

use serde::{Deserialize, Serialize};

use super::commande_item::StatutLivraison;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMouvement {
    Reservation,
    Sortie,
    Retour,
    Liberation,
    Ajustement,
}

/// Stock movement caused by an order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandeItemStockMovement {
    pub uuid: Option<String>,
    pub item_uuid: Option<String>,
    pub produit_uuid: Option<String>,
    pub type_mouvement: TypeMouvement,
    /// Signed: negative when stock leaves
    pub quantite: i64,
    pub stock_avant: Option<i64>,
    pub stock_apres: Option<i64>,
    pub motif: Option<String>,
    pub created_at: Option<String>,
}

/// One price change on an order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandeItemPriceHistory {
    pub uuid: Option<String>,
    pub item_uuid: Option<String>,
    pub ancien_prix: f64,
    pub nouveau_prix: f64,
    pub devise: Option<String>,
    pub motif: Option<String>,
    pub modifie_par: Option<String>,
    pub created_at: Option<String>,
}

impl CommandeItemPriceHistory {
    pub fn variation(&self) -> f64 {
        self.nouveau_prix - self.ancien_prix
    }
}

/// Shipment tracking event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub statut: StatutLivraison,
    pub description: Option<String>,
    pub localisation: Option<String>,
    pub transporteur: Option<String>,
    pub date: Option<String>,
}

/// Shipment details update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_suivi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporteur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_suivi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut_livraison: Option<StatutLivraison>,
}
