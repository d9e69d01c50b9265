//! Aggregates computed by the backend.
//!
//! Every field has a default so that a partial or empty response still
//! decodes into something safe to read: numbers are 0, lists are empty.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::null_default;

/// Analytics window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsPeriod {
    Jour,
    Semaine,
    #[default]
    Mois,
    Trimestre,
    Annee,
}

impl AnalyticsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsPeriod::Jour => "jour",
            AnalyticsPeriod::Semaine => "semaine",
            AnalyticsPeriod::Mois => "mois",
            AnalyticsPeriod::Trimestre => "trimestre",
            AnalyticsPeriod::Annee => "annee",
        }
    }
}

impl std::fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Count and amount for one bucket (a status, a type, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repartition {
    #[serde(deserialize_with = "null_default")]
    pub cle: String,
    #[serde(deserialize_with = "null_default")]
    pub nombre: u64,
    #[serde(deserialize_with = "null_default")]
    pub montant: f64,
}

/// Best selling product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopProduit {
    #[serde(deserialize_with = "null_default")]
    pub produit_uuid: String,
    #[serde(deserialize_with = "null_default")]
    pub nom: String,
    #[serde(deserialize_with = "null_default")]
    pub quantite_vendue: u64,
    #[serde(deserialize_with = "null_default")]
    pub chiffre_affaires: f64,
}

/// Best selling shop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopBoutique {
    #[serde(deserialize_with = "null_default")]
    pub boutique_uuid: String,
    #[serde(deserialize_with = "null_default")]
    pub nom: String,
    #[serde(deserialize_with = "null_default")]
    pub nombre_items: u64,
    #[serde(deserialize_with = "null_default")]
    pub chiffre_affaires: f64,
}

/// Order line statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandeItemStats {
    #[serde(deserialize_with = "null_default")]
    pub total_items: u64,
    #[serde(deserialize_with = "null_default")]
    pub total_quantite: u64,
    #[serde(deserialize_with = "null_default")]
    pub chiffre_affaires: f64,
    #[serde(deserialize_with = "null_default")]
    pub montant_tva_total: f64,
    #[serde(deserialize_with = "null_default")]
    pub montant_reductions: f64,
    #[serde(deserialize_with = "null_default")]
    pub panier_moyen: f64,
    #[serde(deserialize_with = "null_default")]
    pub items_en_promotion: u64,
    #[serde(deserialize_with = "null_default")]
    pub items_retournes: u64,
    #[serde(deserialize_with = "null_default")]
    pub taux_retour: f64,
    #[serde(deserialize_with = "null_default")]
    pub par_statut: Vec<Repartition>,
    #[serde(deserialize_with = "null_default")]
    pub par_statut_livraison: Vec<Repartition>,
    #[serde(deserialize_with = "null_default")]
    pub par_statut_paiement: Vec<Repartition>,
    #[serde(deserialize_with = "null_default")]
    pub par_type: Vec<Repartition>,
    #[serde(deserialize_with = "null_default")]
    pub par_devise: Vec<Repartition>,
    #[serde(deserialize_with = "null_default")]
    pub top_produits: Vec<TopProduit>,
    #[serde(deserialize_with = "null_default")]
    pub top_boutiques: Vec<TopBoutique>,
}

/// One point of a time series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointSerie {
    #[serde(deserialize_with = "null_default")]
    pub date: String,
    #[serde(deserialize_with = "null_default")]
    pub nombre_items: u64,
    #[serde(deserialize_with = "null_default")]
    pub quantite: u64,
    #[serde(deserialize_with = "null_default")]
    pub chiffre_affaires: f64,
}

/// Order line analytics over a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandeItemAnalytics {
    pub periode: Option<AnalyticsPeriod>,
    pub date_debut: Option<String>,
    pub date_fin: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub chiffre_affaires_total: f64,
    #[serde(deserialize_with = "null_default")]
    pub quantite_totale: u64,
    #[serde(deserialize_with = "null_default")]
    pub nombre_items: u64,
    #[serde(deserialize_with = "null_default")]
    pub panier_moyen: f64,
    /// Percent change against the previous period
    #[serde(deserialize_with = "null_default")]
    pub croissance_pourcentage: f64,
    #[serde(deserialize_with = "null_default")]
    pub taux_annulation: f64,
    #[serde(deserialize_with = "null_default")]
    pub taux_retour: f64,
    #[serde(deserialize_with = "null_default")]
    pub evolution: Vec<PointSerie>,
    #[serde(deserialize_with = "null_default")]
    pub repartition_type: Vec<Repartition>,
    #[serde(deserialize_with = "null_default")]
    pub repartition_statut: Vec<Repartition>,
    #[serde(deserialize_with = "null_default")]
    pub top_produits: Vec<TopProduit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_all_zero() {
        let stats: CommandeItemStats = serde_json::from_value(json!({})).unwrap();
        assert_eq!(stats, CommandeItemStats::default());
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.chiffre_affaires, 0.0);
        assert!(stats.par_statut.is_empty());
        assert!(stats.top_produits.is_empty());
    }

    #[test]
    fn test_null_aggregates_read_as_zero() {
        let stats: CommandeItemStats = serde_json::from_value(json!({
            "total_items": 0,
            "chiffre_affaires": null,
            "panier_moyen": null,
            "par_statut": null,
            "top_produits": [{ "produit_uuid": "p-1", "quantite_vendue": null }]
        }))
        .unwrap();
        assert_eq!(stats.chiffre_affaires, 0.0);
        assert_eq!(stats.panier_moyen, 0.0);
        assert!(stats.par_statut.is_empty());
        assert_eq!(stats.top_produits[0].quantite_vendue, 0);
    }

    #[test]
    fn test_partial_analytics() {
        let analytics: CommandeItemAnalytics = serde_json::from_value(json!({
            "periode": "semaine",
            "evolution": [{ "date": "2024-05-01", "quantite": 4 }],
            "taux_retour": 2.5
        }))
        .unwrap();
        assert_eq!(analytics.periode, Some(AnalyticsPeriod::Semaine));
        assert_eq!(analytics.evolution.len(), 1);
        assert_eq!(analytics.evolution[0].quantite, 4);
        assert_eq!(analytics.evolution[0].chiffre_affaires, 0.0);
        assert_eq!(analytics.taux_retour, 2.5);
        assert!(analytics.top_produits.is_empty());
    }
}
