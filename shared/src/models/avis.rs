//! Review model

use serde::{Deserialize, Serialize};

pub const NOTE_MIN: u8 = 1;
pub const NOTE_MAX: u8 = 5;

/// Customer review of an order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandeItemAvis {
    pub uuid: String,
    pub item_uuid: String,
    pub utilisateur_uuid: Option<String>,
    /// 1..=5
    pub note: u8,
    pub titre: Option<String>,
    pub commentaire: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub achat_verifie: bool,
    #[serde(default)]
    pub est_publie: bool,
    pub reponse_vendeur: Option<String>,
    pub created_at: Option<String>,
}

/// Create review payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvisCreate {
    pub note: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

impl AvisCreate {
    pub fn note_valide(&self) -> bool {
        (NOTE_MIN..=NOTE_MAX).contains(&self.note)
    }
}
