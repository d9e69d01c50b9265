//! Request types for list endpoints
//!
//! Pagination, ordering and filters, flattened into ordered query pairs.
//! Only filters that are set are emitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{StatutItem, StatutLivraison, StatutPaiement, TypeItem};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query pair list, in emission order
pub type QueryPairs = Vec<(&'static str, String)>;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filters accepted by the list, stats and analytics endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandeItemFilters {
    pub commande_uuid: Option<String>,
    pub produit_uuid: Option<String>,
    pub annonce_uuid: Option<String>,
    pub don_uuid: Option<String>,
    pub echange_uuid: Option<String>,
    pub boutique_uuid: Option<String>,
    pub vendeur_uuid: Option<String>,
    pub promotion_uuid: Option<String>,
    pub type_item: Option<TypeItem>,
    pub statut: Option<StatutItem>,
    pub statut_livraison: Option<StatutLivraison>,
    pub statut_paiement: Option<StatutPaiement>,
    pub devise: Option<String>,
    pub est_en_promotion: Option<bool>,
    pub accepte_retour: Option<bool>,
    pub include_deleted: Option<bool>,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub prix_min: Option<f64>,
    pub prix_max: Option<f64>,
    pub tags: Vec<String>,
}

impl CommandeItemFilters {
    pub fn for_commande(commande_uuid: impl Into<String>) -> Self {
        Self {
            commande_uuid: Some(commande_uuid.into()),
            ..Default::default()
        }
    }

    /// Set filters as query pairs
    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();

        let uuids = [
            ("commande_uuid", &self.commande_uuid),
            ("produit_uuid", &self.produit_uuid),
            ("annonce_uuid", &self.annonce_uuid),
            ("don_uuid", &self.don_uuid),
            ("echange_uuid", &self.echange_uuid),
            ("boutique_uuid", &self.boutique_uuid),
            ("vendeur_uuid", &self.vendeur_uuid),
            ("promotion_uuid", &self.promotion_uuid),
        ];
        for (key, value) in uuids {
            if let Some(v) = non_blank(value) {
                pairs.push((key, v.to_string()));
            }
        }

        if let Some(t) = self.type_item {
            pairs.push(("type_item", t.as_str().to_string()));
        }
        if let Some(s) = self.statut {
            pairs.push(("statut", s.as_str().to_string()));
        }
        if let Some(s) = self.statut_livraison {
            pairs.push(("statut_livraison", s.as_str().to_string()));
        }
        if let Some(s) = self.statut_paiement {
            pairs.push(("statut_paiement", s.as_str().to_string()));
        }
        if let Some(d) = non_blank(&self.devise) {
            pairs.push(("devise", d.to_string()));
        }

        let flags = [
            ("est_en_promotion", self.est_en_promotion),
            ("accepte_retour", self.accepte_retour),
            ("include_deleted", self.include_deleted),
        ];
        for (key, value) in flags {
            if let Some(v) = value {
                pairs.push((key, v.to_string()));
            }
        }

        if let Some(d) = self.date_debut {
            pairs.push(("date_debut", d.format(DATE_FORMAT).to_string()));
        }
        if let Some(d) = self.date_fin {
            pairs.push(("date_fin", d.format(DATE_FORMAT).to_string()));
        }
        if let Some(p) = self.prix_min {
            pairs.push(("prix_min", p.to_string()));
        }
        if let Some(p) = self.prix_max {
            pairs.push(("prix_max", p.to_string()));
        }

        let tags: Vec<&str> = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if !tags.is_empty() {
            pairs.push(("tags", tags.join(",")));
        }

        pairs
    }
}

/// List request: pagination, search, ordering and filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filters: CommandeItemFilters,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort_by: None,
            sort_order: None,
            filters: CommandeItemFilters::default(),
        }
    }
}

impl ListParams {
    pub fn with_filters(filters: CommandeItemFilters) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Page clamped to 1..
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Limit clamped to 1..=MAX_LIMIT
    pub fn limit(&self) -> u32 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Pagination first, then search and ordering, then filters
    pub fn to_query_pairs(&self) -> QueryPairs {
        let mut pairs: QueryPairs = vec![
            ("page", self.page().to_string()),
            ("limit", self.limit().to_string()),
        ];
        if let Some(s) = non_blank(&self.search) {
            pairs.push(("search", s.to_string()));
        }
        if let Some(s) = non_blank(&self.sort_by) {
            pairs.push(("sort_by", s.to_string()));
            pairs.push((
                "sort_order",
                self.sort_order.unwrap_or_default().as_str().to_string(),
            ));
        }
        pairs.extend(self.filters.to_query_pairs());
        pairs
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &QueryPairs) -> Vec<&'static str> {
        pairs.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_defaults_only_paginate() {
        let pairs = ListParams::default().to_query_pairs();
        assert_eq!(
            pairs,
            vec![("page", "1".to_string()), ("limit", "20".to_string())]
        );
    }

    #[test]
    fn test_only_set_filters_emitted() {
        let params = ListParams::with_filters(CommandeItemFilters {
            type_item: Some(TypeItem::Produit),
            statut: Some(StatutItem::Livre),
            ..Default::default()
        });
        let pairs = params.to_query_pairs();
        assert_eq!(keys(&pairs), vec!["page", "limit", "type_item", "statut"]);
        assert_eq!(pairs[2].1, "produit");
        assert_eq!(pairs[3].1, "livre");
    }

    #[test]
    fn test_blank_strings_are_unset() {
        let filters = CommandeItemFilters {
            boutique_uuid: Some("   ".into()),
            devise: Some(String::new()),
            tags: vec![" ".into()],
            ..Default::default()
        };
        assert!(filters.to_query_pairs().is_empty());
    }

    #[test]
    fn test_tags_dates_and_flags() {
        let filters = CommandeItemFilters {
            est_en_promotion: Some(false),
            date_debut: NaiveDate::from_ymd_opt(2024, 1, 5),
            date_fin: NaiveDate::from_ymd_opt(2024, 2, 1),
            tags: vec!["bio".into(), " local ".into()],
            ..Default::default()
        };
        let pairs = filters.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("est_en_promotion", "false".to_string()),
                ("date_debut", "2024-01-05".to_string()),
                ("date_fin", "2024-02-01".to_string()),
                ("tags", "bio,local".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_order_follows_sort_by() {
        let params = ListParams::default().order_by("created_at", SortOrder::Asc);
        let pairs = params.to_query_pairs();
        assert_eq!(keys(&pairs), vec!["page", "limit", "sort_by", "sort_order"]);
        assert_eq!(pairs[3].1, "asc");

        let mut params = ListParams::default();
        params.sort_order = Some(SortOrder::Asc);
        assert_eq!(keys(&params.to_query_pairs()), vec!["page", "limit"]);
    }

    #[test]
    fn test_limit_is_clamped() {
        let params = ListParams::default().paginate(0, 500);
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_LIMIT);
    }
}
