//! Content API endpoint paths and request/response types.

use serde::{Deserialize, Serialize};

/// Document search, relative to the API root.
pub const SEARCH: &str = "documents/search";

/// Response from the API root.
#[derive(Debug, Deserialize)]
pub struct ApiInfoResponse {
    #[serde(default)]
    pub refs: Vec<RefInfo>,
}

/// One repository revision listed by the API root.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefInfo {
    pub id: String,
    #[serde(rename = "ref")]
    pub content_ref: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_master_ref: bool,
}

/// Query parameters of a document search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery<'a> {
    #[serde(rename = "ref")]
    pub content_ref: &'a str,
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orderings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
    #[serde(rename = "access_token", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<&'a str>,
}

/// Query parameters of the API root request.
#[derive(Debug, Serialize)]
pub struct ApiInfoQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<&'a str>,
}

/// Error body of a non-success response.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
