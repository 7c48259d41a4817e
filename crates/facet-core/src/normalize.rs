//! Tolerant normalization of raw search-service responses.
//!
//! The upstream service is inconsistent about which field carries a facet
//! option's identity and about the shape of product categories, so every
//! raw field here is optional and normalization never fails: missing
//! values take documented defaults (empty collections, zero counts,
//! [`DEFAULT_LIMIT`] for a missing page size).

use serde::Deserialize;
use serde_json::Value;

use crate::query::DEFAULT_LIMIT;
use crate::result::{Brand, Category, FacetOption, Facets, Product, SearchResult};

/// A search-service response as it arrives off the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub items: Vec<RawProduct>,
    #[serde(default)]
    pub facets: RawFacets,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub limit: i64,
    /// Echoed request page; not used by normalization.
    #[serde(default)]
    pub page: i64,
}

/// Raw facet groups. Options are kept as loose JSON because the service is
/// inconsistent about their shape (see [`normalize`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFacets {
    #[serde(default)]
    pub brands: Vec<Value>,
    #[serde(default)]
    pub categories: Vec<Value>,
}

/// A raw product entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub brand: Option<RawBrand>,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
}

/// A raw brand reference. Extra fields (numeric ids etc.) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBrand {
    #[serde(default)]
    pub name: String,
}

/// A raw category entry: either a bare label or the structured form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    Label(String),
    Structured { name: String },
}

/// Map a raw response into the canonical [`SearchResult`].
pub fn normalize(raw: RawSearchResponse) -> SearchResult {
    let limit = u32::try_from(raw.limit)
        .ok()
        .filter(|l| *l >= 1)
        .unwrap_or(DEFAULT_LIMIT);

    let mut items: Vec<Product> = raw.items.into_iter().map(normalize_product).collect();
    items.truncate(limit as usize);

    SearchResult {
        items,
        facets: Facets {
            brands: raw.facets.brands.iter().map(normalize_facet_option).collect(),
            categories: raw
                .facets
                .categories
                .iter()
                .map(normalize_facet_option)
                .collect(),
        },
        total: u64::try_from(raw.total).unwrap_or(0),
        limit,
    }
}

fn normalize_product(raw: RawProduct) -> Product {
    Product {
        id: raw.id,
        name: raw.name,
        image: raw.image,
        brand: raw.brand.map(|b| Brand { name: b.name }),
        categories: raw
            .categories
            .into_iter()
            .map(|c| match c {
                RawCategory::Label(name) | RawCategory::Structured { name } => Category { name },
            })
            .collect(),
    }
}

/// Identity fallback chain: `value`, then `name`, then `id`, then the whole
/// entry coerced to a display string. The label chain skips `id` so an
/// id-only option still renders as something human-readable.
fn normalize_facet_option(raw: &Value) -> FacetOption {
    let id = field_string(raw, "value")
        .or_else(|| field_string(raw, "name"))
        .or_else(|| field_string(raw, "id"))
        .unwrap_or_else(|| coerce_display(raw));

    let label = field_string(raw, "value")
        .or_else(|| field_string(raw, "name"))
        .unwrap_or_else(|| coerce_display(raw));

    let count = raw.get("count").and_then(Value::as_u64).unwrap_or(0);

    FacetOption { id, label, count }
}

fn field_string(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_display(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> RawSearchResponse {
        serde_json::from_value(value).expect("raw response should deserialize")
    }

    #[test]
    fn test_empty_response_normalizes_to_defaults() {
        let result = normalize(RawSearchResponse::default());

        assert!(result.items.is_empty());
        assert!(result.facets.brands.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_facet_option_identity_fallback_chain() {
        let raw = parse(json!({
            "facets": {
                "brands": [
                    { "value": "acme", "name": "Acme Corp", "count": 3 },
                    { "name": "Acme" },
                    { "id": 7, "count": 2 },
                    "bare-label"
                ],
                "categories": []
            }
        }));

        let result = normalize(raw);
        let brands = &result.facets.brands;

        assert_eq!(brands[0], FacetOption { id: "acme".into(), label: "acme".into(), count: 3 });
        assert_eq!(brands[1], FacetOption { id: "Acme".into(), label: "Acme".into(), count: 0 });
        assert_eq!(brands[2].id, "7");
        assert_eq!(brands[2].count, 2);
        assert_eq!(brands[3], FacetOption { id: "bare-label".into(), label: "bare-label".into(), count: 0 });
    }

    #[test]
    fn test_facet_count_defaults_on_malformed_value() {
        let raw = parse(json!({
            "facets": { "brands": [{ "name": "Acme", "count": -4 }], "categories": [] }
        }));

        assert_eq!(normalize(raw).facets.brands[0].count, 0);
    }

    #[test]
    fn test_categories_accept_bare_and_structured_forms() {
        let raw = parse(json!({
            "items": [{
                "id": "p1",
                "name": "Trail Boot",
                "categories": ["shoes", { "name": "outdoor" }]
            }],
            "total": 1,
            "limit": 20
        }));

        let result = normalize(raw);
        let categories = &result.items[0].categories;

        assert_eq!(categories[0], Category { name: "shoes".into() });
        assert_eq!(categories[1], Category { name: "outdoor".into() });
    }

    #[test]
    fn test_product_optional_fields_default() {
        let raw = parse(json!({
            "items": [{ "id": "p1", "name": "Boot" }],
            "total": 1
        }));

        let product = &normalize(raw).items[0];
        assert_eq!(product.image, None);
        assert_eq!(product.brand, None);
        assert!(product.categories.is_empty());
    }

    #[test]
    fn test_brand_keeps_name_and_drops_extras() {
        let raw = parse(json!({
            "items": [{ "id": "p1", "name": "Boot", "brand": { "id": 12, "name": "Acme" } }]
        }));

        let product = &normalize(raw).items[0];
        assert_eq!(product.brand, Some(Brand { name: "Acme".into() }));
    }

    #[test]
    fn test_items_truncated_to_limit() {
        let raw = parse(json!({
            "items": [
                { "id": "a", "name": "A" },
                { "id": "b", "name": "B" },
                { "id": "c", "name": "C" }
            ],
            "total": 3,
            "limit": 2
        }));

        let result = normalize(raw);
        assert_eq!(result.len(), 2);
        assert_eq!(result.limit, 2);
    }

    #[test]
    fn test_negative_totals_and_limits_fall_back() {
        let raw = parse(json!({ "total": -5, "limit": -1 }));
        let result = normalize(raw);

        assert_eq!(result.total, 0);
        assert_eq!(result.limit, DEFAULT_LIMIT);
    }
}
