//! Catalog products and per-page product links.
//!
//! The catalog itself belongs to an external service; this module only
//! reads it. Product ids are normalised to integers, with `0` as the
//! "unparseable" sentinel that never matches a real product.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

pub type ProductId = i64;

/// Sentinel for ids that could not be parsed. Never a valid catalog id.
pub const INVALID_PRODUCT_ID: ProductId = 0;

/// Normalise a raw product id. Surrounding whitespace is ignored; anything
/// that is not a positive integer maps to [`INVALID_PRODUCT_ID`].
pub fn normalize_product_id(raw: &str) -> ProductId {
    match raw.trim().parse::<ProductId>() {
        Ok(id) if id > 0 => id,
        _ => INVALID_PRODUCT_ID,
    }
}

/// Accepts `12` or `"12"` on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Number(serde_json::Number),
    Text(String),
}

fn deserialize_product_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawProductId::deserialize(deserializer)? {
        RawProductId::Number(n) => n
            .as_i64()
            .filter(|id| *id > 0)
            .unwrap_or(INVALID_PRODUCT_ID),
        RawProductId::Text(s) => normalize_product_id(&s),
    })
}

/// A catalog product as exposed by the catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "deserialize_product_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub identifier_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit_price: f64,
}

impl Product {
    pub fn new(id: ProductId, name: &str, identifier_code: &str, description: &str, unit_price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            identifier_code: identifier_code.to_string(),
            description: description.to_string(),
            unit_price,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.identifier_code.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Parse a catalog from JSON (an array of products). Entries whose id
/// normalises to the sentinel are dropped.
pub fn load_catalog_json(json: &str) -> Result<Vec<Product>, String> {
    let products: Vec<Product> =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse catalog JSON: {e}"))?;
    Ok(products
        .into_iter()
        .filter(|p| {
            let valid = p.id != INVALID_PRODUCT_ID;
            if !valid {
                log::warn!("Skipping catalog entry {:?} with invalid id", p.name);
            }
            valid
        })
        .collect())
}

/// Case-insensitive substring search over name, identifier code and
/// description. The query is matched as typed, surrounding whitespace
/// included. An empty query returns the whole catalog in its original order.
pub fn search_catalog<'a>(query: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
    if query.is_empty() {
        return catalog.iter().collect();
    }
    let needle = query.to_lowercase();
    catalog.iter().filter(|p| p.matches(&needle)).collect()
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// The set of products linked to one page. Order-irrelevant, unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductLinks(BTreeSet<ProductId>);

impl ProductLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns whether the
    /// product is linked afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.iter().copied()
    }

    /// The catalog entries whose ids are linked, in catalog order. Linked
    /// ids with no catalog entry are skipped.
    pub fn resolve<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        let resolved: Vec<&Product> = catalog.iter().filter(|p| self.contains(p.id)).collect();
        if resolved.len() < self.len() {
            log::debug!(
                "{} linked product(s) missing from catalog",
                self.len() - resolved.len()
            );
        }
        resolved
    }
}

impl FromIterator<ProductId> for ProductLinks {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A small built-in catalog used by the CLI when none is supplied.
pub fn demo_catalog() -> Vec<Product> {
    vec![
        Product::new(1, "Silk Blend Tailored Blazer", "BLZ-1001", "Single-breasted blazer in a silk and wool blend.", 289.0),
        Product::new(2, "Leather Crossbody Bag", "BAG-2040", "Structured crossbody in smooth calf leather.", 198.0),
        Product::new(3, "Pleated Wide-Leg Trousers", "TRS-3310", "High-rise trousers with front pleats.", 145.0),
        Product::new(4, "Cashmere Crew Sweater", "KNT-4102", "Fine-gauge crew neck in pure cashmere.", 230.0),
        Product::new(5, "Suede Ankle Boots", "SHO-5077", "Block-heel ankle boots in soft suede.", 265.0),
        Product::new(6, "Linen Midi Dress", "DRS-6021", "Relaxed midi dress in washed linen.", 175.0),
        Product::new(7, "Gold Hoop Earrings", "ACC-7008", "Polished hoops, 18k gold vermeil.", 85.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_numeric_strings() {
        assert_eq!(normalize_product_id("42"), 42);
        assert_eq!(normalize_product_id(" 7 "), 7);
        assert_eq!(normalize_product_id("abc"), INVALID_PRODUCT_ID);
        assert_eq!(normalize_product_id(""), INVALID_PRODUCT_ID);
        assert_eq!(normalize_product_id("-3"), INVALID_PRODUCT_ID);
        assert_eq!(normalize_product_id("1.5"), INVALID_PRODUCT_ID);
    }

    #[test]
    fn sentinel_never_matches_catalog() {
        let catalog = demo_catalog();
        assert!(catalog.iter().all(|p| p.id != INVALID_PRODUCT_ID));
        let links: ProductLinks = [INVALID_PRODUCT_ID].into_iter().collect();
        assert!(links.resolve(&catalog).is_empty());
    }

    #[test]
    fn toggle_is_self_inverse() {
        let mut links: ProductLinks = [3, 7].into_iter().collect();
        let before = links.clone();
        assert!(links.toggle(5));
        assert!(!links.toggle(5));
        assert_eq!(links, before);
        assert!(!links.toggle(3));
        assert!(links.toggle(3));
        assert_eq!(links, before);
    }

    #[test]
    fn resolve_keeps_catalog_order_and_skips_dangling() {
        let catalog = demo_catalog();
        let links: ProductLinks = [5, 99, 2].into_iter().collect();
        let ids: Vec<_> = links.resolve(&catalog).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = demo_catalog();
        let ids = |q: &str| search_catalog(q, &catalog).iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids("SILK"), vec![1]);
        assert_eq!(ids("bag-2040"), vec![2]);
        assert_eq!(ids("cashmere"), vec![4]);
        assert_eq!(ids("leather"), vec![2]);
        assert!(ids("velvet").is_empty());
    }

    #[test]
    fn empty_query_returns_everything() {
        let catalog = demo_catalog();
        assert_eq!(search_catalog("", &catalog).len(), catalog.len());
    }

    #[test]
    fn query_whitespace_is_significant() {
        let catalog = vec![
            Product::new(1, "Silk Blend Tailored Blazer", "", "", 289.0),
            Product::new(2, "Silkscreen Tee", "", "", 45.0),
        ];
        assert!(search_catalog("   ", &catalog).is_empty());
        let hits: Vec<_> = search_catalog("silk ", &catalog).iter().map(|p| p.id).collect();
        assert_eq!(hits, vec![1]);
        let hits: Vec<_> = search_catalog(" blend", &catalog).iter().map(|p| p.id).collect();
        assert_eq!(hits, vec![1]);
        assert_eq!(search_catalog("silk", &catalog).len(), 2);
    }

    #[test]
    fn catalog_json_accepts_string_ids() {
        let json = r#"[
            {"id": "12", "name": "Wool Coat", "identifierCode": "CT-12", "description": "", "unitPrice": 410.0},
            {"id": 13, "name": "Scarf"},
            {"id": "n/a", "name": "Broken"}
        ]"#;
        let catalog = load_catalog_json(json).unwrap();
        let ids: Vec<_> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![12, 13]);
        assert_eq!(catalog[0].identifier_code, "CT-12");
        assert!(load_catalog_json("{").is_err());
    }
}
