//! Query string encoding

use shared::request::QueryPairs;

/// Append percent-encoded pairs to `path`. No pairs, no `?`.
pub fn with_query(path: &str, pairs: &QueryPairs) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

/// Percent-encode one path segment
pub fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{StatutItem, TypeItem};
    use shared::{CommandeItemFilters, ListParams};

    #[test]
    fn test_no_pairs_no_question_mark() {
        assert_eq!(with_query("commandes/items/stats", &Vec::new()), "commandes/items/stats");
    }

    #[test]
    fn test_values_are_encoded() {
        let pairs = vec![("search", "café & thé".to_string()), ("tags", "a,b".to_string())];
        assert_eq!(
            with_query("x", &pairs),
            "x?search=caf%C3%A9%20%26%20th%C3%A9&tags=a%2Cb"
        );
    }

    #[test]
    fn test_type_and_status_filter_only() {
        let params = ListParams::with_filters(CommandeItemFilters {
            type_item: Some(TypeItem::Produit),
            statut: Some(StatutItem::Livre),
            ..Default::default()
        });
        let url = with_query("commandes/items", &params.to_query_pairs());
        assert_eq!(url, "commandes/items?page=1&limit=20&type_item=produit&statut=livre");
        assert!(url.contains("type_item=produit&statut=livre"));
        for key in ["commande_uuid", "devise", "statut_livraison", "tags", "search"] {
            assert!(!url.contains(key), "{key} should not be emitted");
        }
    }

    #[test]
    fn test_segment() {
        assert_eq!(segment(" a/b "), "a%2Fb");
        assert_eq!(segment("0b1d-42"), "0b1d-42");
    }
}
