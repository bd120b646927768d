//! Content documents, queries and result pages.
//!
//! This module defines the types exchanged with a content API.
//! The actual operations are methods on [`ContentApi`](crate::ContentApi).

mod document;
mod page;
mod query;

pub use document::Document;
pub use page::DocumentPage;
pub use query::{
    DOCUMENT_ID, DOCUMENT_TYPE, Direction, FIRST_PUBLICATION_DATE, Ordering, Predicate, Query,
};
