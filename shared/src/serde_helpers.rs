//! Serde helpers for aggregates the backend may fill with `null`
//!
//! `#[serde(default)]` only covers missing keys. Aggregates over an empty set
//! often come back as explicit `null`; these read them as the default.

use serde::{Deserialize, Deserializer};

/// Deserialize any `Default` value, treating null as the default
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Totaux {
        #[serde(deserialize_with = "null_default")]
        montant: f64,
        #[serde(deserialize_with = "null_default")]
        lignes: Vec<u64>,
    }

    #[test]
    fn test_null_reads_as_default() {
        let t: Totaux = serde_json::from_value(json!({ "montant": null, "lignes": null })).unwrap();
        assert_eq!(t.montant, 0.0);
        assert!(t.lignes.is_empty());
    }

    #[test]
    fn test_values_and_missing_keys() {
        let t: Totaux = serde_json::from_value(json!({ "montant": 4.5 })).unwrap();
        assert_eq!(t.montant, 4.5);
        assert!(t.lignes.is_empty());
    }
}
