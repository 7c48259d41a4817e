//! Canonical query state for faceted product search.
//!
//! This crate is the pure, I/O-free half of the search stack:
//!
//! - **Params**: an ordered URL query-parameter multimap
//! - **Query**: the canonical, URL-addressable `SearchQuery`
//! - **Codec**: the bidirectional `SearchQuery` <-> multimap mapping
//! - **Result**: canonical products, facets, and result pages
//! - **Normalize**: tolerant mapping of raw service responses
//!
//! The codec is total in the decode direction (malformed input degrades to
//! defaults) and deterministic in the encode direction (equal queries always
//! produce byte-identical parameter lists), which is what makes search URLs
//! shareable.

pub mod codec;
pub mod normalize;
pub mod params;
pub mod query;
pub mod result;

pub use normalize::{normalize, RawSearchResponse};
pub use params::QueryParams;
pub use query::{FacetGroup, SearchQuery, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use result::{Brand, Category, FacetOption, Facets, Product, SearchResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::codec;
    pub use crate::normalize::{normalize, RawSearchResponse};
    pub use crate::params::QueryParams;
    pub use crate::query::{FacetGroup, SearchQuery, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
    pub use crate::result::{Brand, Category, FacetOption, Facets, Product, SearchResult};
}
