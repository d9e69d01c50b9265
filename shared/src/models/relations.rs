//! Hydrated relations
//!
//! Denormalized views the API may embed next to an order line. They are
//! read-only snapshots: nothing here is ever sent back.

use serde::{Deserialize, Serialize};

/// Product summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProduitResume {
    pub uuid: String,
    pub nom: String,
    pub reference: Option<String>,
    pub prix: Option<f64>,
    pub image: Option<String>,
    pub categorie: Option<String>,
}

/// Classified ad summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnonceResume {
    pub uuid: String,
    pub titre: String,
    pub prix: Option<f64>,
    pub image: Option<String>,
}

/// Donation summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonResume {
    pub uuid: String,
    pub titre: String,
    pub donateur_uuid: Option<String>,
    pub image: Option<String>,
}

/// Exchange summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EchangeResume {
    pub uuid: String,
    pub titre: String,
    pub objet_propose: Option<String>,
    pub objet_recherche: Option<String>,
}

/// Promotion summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionResume {
    pub uuid: String,
    pub nom: String,
    pub code: Option<String>,
    pub reduction_pourcentage: Option<f64>,
    pub reduction_montant: Option<f64>,
    pub date_fin: Option<String>,
}

/// Shop summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoutiqueResume {
    pub uuid: String,
    pub nom: String,
    pub slug: Option<String>,
    pub logo: Option<String>,
}
