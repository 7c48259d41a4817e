//! Bidirectional mapping between [`SearchQuery`] and the URL multimap.
//!
//! `decode` is total: malformed or missing values degrade to defaults and
//! unknown parameters are ignored. `encode` is deterministic: facet
//! selections are emitted in a stable order, so two semantically equal
//! queries always produce byte-identical parameter lists. Together they
//! satisfy `decode(encode(q)) == q` for every valid query.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::params::QueryParams;
use crate::query::{SearchQuery, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

/// Decode a URL parameter multimap into a canonical query. Never fails.
pub fn decode(params: &QueryParams) -> SearchQuery {
    let text = params.get("q").unwrap_or("").to_string();
    let brand_ids = params.get_all("brand").into_iter().map(String::from).collect();
    let category_ids = params
        .get_all("category")
        .into_iter()
        .map(String::from)
        .collect();

    let page = parse_positive(params.get("page")).unwrap_or(DEFAULT_PAGE);
    let limit = parse_positive(params.get("limit"))
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT);

    SearchQuery {
        text,
        brand_ids,
        category_ids,
        page,
        limit,
    }
}

/// Encode a canonical query into a URL parameter multimap.
pub fn encode(query: &SearchQuery) -> QueryParams {
    let mut params = QueryParams::new();

    if !query.text.is_empty() {
        params.append("q", query.text.as_str());
    }
    for id in sorted_ids(&query.brand_ids) {
        params.append("brand", id);
    }
    for id in sorted_ids(&query.category_ids) {
        params.append("category", id);
    }

    let page = if query.page >= 1 { query.page } else { DEFAULT_PAGE };
    let limit = if query.limit >= 1 { query.limit } else { DEFAULT_LIMIT };
    params.append("page", page.to_string());
    params.append("limit", limit.to_string());

    params
}

/// Stable comparator for facet option ids: numeric when both sides parse as
/// finite numbers, lexicographic otherwise.
pub fn facet_id_cmp(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => x.total_cmp(&y),
        _ => a.cmp(b),
    }
}

fn sorted_ids(ids: &BTreeSet<String>) -> Vec<&str> {
    let mut out: Vec<&str> = ids.iter().map(String::as_str).collect();
    out.sort_by(|a, b| facet_id_cmp(a, b));
    out
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|n| *n >= 1)
}
