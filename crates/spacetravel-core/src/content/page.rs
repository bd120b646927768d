//! Paged query results.

use serde::Deserialize;
use serde_json::Value;

use super::Document;
use crate::error::{Error, SchemaError};

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage {
    /// The documents in this page.
    pub results: Vec<Document>,

    /// Opaque URL of the next page, if more results exist.
    pub next_page: Option<String>,
}

#[derive(Deserialize)]
struct RawPage {
    results: Vec<Value>,
    #[serde(default)]
    next_page: Option<String>,
}

impl DocumentPage {
    /// Create a page, normalizing an empty cursor to `None`.
    pub fn new(results: Vec<Document>, next_page: Option<String>) -> Self {
        Self {
            results,
            next_page: next_page.filter(|url| !url.is_empty()),
        }
    }

    /// Validate a `{ results, next_page }` response body.
    ///
    /// Extra keys (`page`, `total_pages`, ...) are ignored.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let raw: RawPage = serde_json::from_value(value).map_err(|e| SchemaError::Response {
            reason: e.to_string(),
        })?;

        let results = raw
            .results
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                serde_json::from_value::<Document>(v).map_err(|e| {
                    Error::from(SchemaError::Document {
                        reason: format!("result {}: {}", i, e),
                    })
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self::new(results, raw.next_page))
    }

    /// Validate a response body given as raw bytes.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(body).map_err(|e| SchemaError::Response {
            reason: e.to_string(),
        })?;
        Self::from_value(value)
    }
}
