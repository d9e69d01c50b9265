//! Return request model

use serde::{Deserialize, Serialize};

/// Return lifecycle
///
/// ```text
/// en_attente ─┬─> approuve ──> en_cours ──> complete
///             └─> refuse
/// (any state) ──> annule
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatutRetour {
    #[default]
    EnAttente,
    Approuve,
    Refuse,
    EnCours,
    Complete,
    Annule,
}

impl StatutRetour {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatutRetour::EnAttente => "en_attente",
            StatutRetour::Approuve => "approuve",
            StatutRetour::Refuse => "refuse",
            StatutRetour::EnCours => "en_cours",
            StatutRetour::Complete => "complete",
            StatutRetour::Annule => "annule",
        }
    }

    /// Whether `self -> next` is a legal step
    pub fn can_transition_to(&self, next: StatutRetour) -> bool {
        use StatutRetour::*;
        match (self, next) {
            (Annule, _) => false,
            (_, Annule) => true,
            (EnAttente, Approuve) | (EnAttente, Refuse) => true,
            (Approuve, EnCours) => true,
            (EnCours, Complete) => true,
            _ => false,
        }
    }

    /// No further step except cancellation
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StatutRetour::Refuse | StatutRetour::Complete | StatutRetour::Annule
        )
    }
}

impl std::fmt::Display for StatutRetour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why the customer sends the item back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotifRetour {
    Defectueux,
    NonConforme,
    Endommage,
    ErreurCommande,
    ChangementAvis,
    Autre,
}

/// Return request entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandeItemRetour {
    pub uuid: String,
    pub item_uuid: String,
    pub commande_uuid: Option<String>,
    pub motif: MotifRetour,
    pub description: Option<String>,
    pub quantite: u32,
    #[serde(default)]
    pub statut: StatutRetour,
    pub montant_rembourse: Option<f64>,
    pub mode_remboursement: Option<String>,
    pub notes_interne: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create return payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetourRequest {
    pub item_uuid: String,
    pub quantite: u32,
    pub motif: MotifRetour,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

/// Return status change payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetourStatusUpdate {
    pub statut: StatutRetour,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_interne: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatutRetour::*;

    const ALL: [StatutRetour; 6] = [EnAttente, Approuve, Refuse, EnCours, Complete, Annule];

    #[test]
    fn test_happy_path() {
        assert!(EnAttente.can_transition_to(Approuve));
        assert!(Approuve.can_transition_to(EnCours));
        assert!(EnCours.can_transition_to(Complete));
        assert!(EnAttente.can_transition_to(Refuse));
    }

    #[test]
    fn test_cancel_from_anywhere() {
        for from in ALL.iter().filter(|s| **s != Annule) {
            assert!(from.can_transition_to(Annule), "{from} -> annule");
        }
        assert!(!Annule.can_transition_to(Annule));
    }

    #[test]
    fn test_no_skipping_steps() {
        assert!(!EnAttente.can_transition_to(EnCours));
        assert!(!EnAttente.can_transition_to(Complete));
        assert!(!Approuve.can_transition_to(Complete));
        assert!(!Refuse.can_transition_to(Approuve));
        assert!(!Complete.can_transition_to(EnCours));
        for to in ALL {
            assert!(!Annule.can_transition_to(to));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(Refuse.is_terminal());
        assert!(Complete.is_terminal());
        assert!(Annule.is_terminal());
        assert!(!EnCours.is_terminal());
    }

    #[test]
    fn test_status_update_wire_format() {
        let update = RetourStatusUpdate {
            statut: EnCours,
            notes_interne: Some("colis reçu".into()),
        };
        let out = serde_json::to_value(&update).unwrap();
        assert_eq!(out["statut"], "en_cours");
        assert_eq!(out["notes_interne"], "colis reçu");
    }
}
