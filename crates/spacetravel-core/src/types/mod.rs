//! Validated identifier types.
//!
//! These types enforce their invariants at construction time, so a query
//! can never be built from a malformed URL or type id.

mod api_url;
mod document_type;

pub use api_url::ApiUrl;
pub use document_type::DocumentType;
