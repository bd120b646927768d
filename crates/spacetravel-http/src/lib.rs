//! spacetravel-http - Content API backend over HTTP.
//!
//! Talks to a Prismic-style REST API: the API root lists repository refs and
//! `documents/search` answers predicate queries with paged results.

mod api;
mod client;
mod endpoints;

pub use api::HttpContentApi;
pub use endpoints::RefInfo;
