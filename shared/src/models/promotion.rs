//! Advisory lookups used while validating a new order line

use serde::{Deserialize, Serialize};

use super::commande_item::Reduction;

/// Stock availability for a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockDisponibilite {
    pub produit_uuid: Option<String>,
    /// Quantity that can still be sold; `None` when the reply did not say
    pub quantite_disponible: Option<i64>,
    pub quantite_reservee: Option<i64>,
    pub seuil_alerte: Option<i64>,
}

impl StockDisponibilite {
    /// `None` when availability is unknown
    pub fn couvre(&self, quantite: i64) -> Option<bool> {
        self.quantite_disponible.map(|disponible| disponible >= quantite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_quantity_is_unknown() {
        let stock: StockDisponibilite = serde_json::from_value(json!({})).unwrap();
        assert_eq!(stock.couvre(1), None);

        let stock: StockDisponibilite =
            serde_json::from_value(json!({ "quantite_disponible": null })).unwrap();
        assert_eq!(stock.couvre(1), None);
    }

    #[test]
    fn test_known_quantity() {
        let stock: StockDisponibilite =
            serde_json::from_value(json!({ "quantite_disponible": 3 })).unwrap();
        assert_eq!(stock.couvre(3), Some(true));
        assert_eq!(stock.couvre(4), Some(false));
    }
}

/// A promotion the order line could benefit from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionSuggestion {
    pub uuid: String,
    #[serde(default)]
    pub nom: String,
    pub code: Option<String>,
    pub reduction_pourcentage: Option<f64>,
    pub reduction_montant: Option<f64>,
    pub quantite_minimale: Option<u32>,
    pub date_fin: Option<String>,
}

impl PromotionSuggestion {
    pub fn reduction(&self) -> Option<Reduction> {
        match (self.reduction_pourcentage, self.reduction_montant) {
            (Some(p), _) => Some(Reduction::Pourcentage(p)),
            (None, Some(m)) => Some(Reduction::Montant(m)),
            (None, None) => None,
        }
    }
}
