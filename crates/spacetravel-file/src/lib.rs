//! spacetravel-file - Content backend over a local directory.
//!
//! A content directory holds one JSON document per file:
//!
//! ```text
//! <root>/documents/<type>/<name>.json
//! <root>/previews/<ref>/<type>/<name>.json
//! ```
//!
//! Preview revisions override published documents with the same id.

mod api;
mod cursor;
mod eval;
mod store;

pub use api::{DEFAULT_PAGE_SIZE, FileContentApi};
pub use store::DocumentStore;
