//! `file://` page cursors.
//!
//! A cursor is the content directory URL with the originating query and the
//! page number in its query string, so it can be handed out as an opaque
//! `next_page` and resolved later against the same directory.

use serde::{Deserialize, Serialize};
use url::Url;

use spacetravel_core::content::{Direction, Ordering, Predicate};
use spacetravel_core::error::InvalidInputError;
use spacetravel_core::{ApiUrl, ContentRef, Query, Result};

const QUERY_PARAM: &str = "query";
const PAGE_PARAM: &str = "page";

#[derive(Debug, Serialize, Deserialize)]
struct CursorQuery {
    predicates: Vec<CursorPredicate>,
    #[serde(default)]
    fetch: Vec<String>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    orderings: Vec<CursorOrdering>,
    #[serde(default)]
    after: Option<String>,
    #[serde(default, rename = "ref")]
    content_ref: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CursorPredicate {
    path: String,
    value: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CursorOrdering {
    field: String,
    #[serde(default)]
    descending: bool,
}

fn invalid(message: impl Into<String>) -> spacetravel_core::Error {
    InvalidInputError::Other {
        message: message.into(),
    }
    .into()
}

/// Build the cursor of `page` for `query`.
pub(crate) fn encode(api: &ApiUrl, query: &Query, page: u32) -> Result<String> {
    let cursor = CursorQuery {
        predicates: query
            .predicates
            .iter()
            .map(|p| {
                let Predicate::At { path, value } = p;
                CursorPredicate {
                    path: path.clone(),
                    value: value.clone(),
                }
            })
            .collect(),
        fetch: query.fetch.clone(),
        page_size: query.page_size,
        orderings: query
            .orderings
            .iter()
            .map(|o| CursorOrdering {
                field: o.field.clone(),
                descending: o.direction == Direction::Descending,
            })
            .collect(),
        after: query.after.clone(),
        content_ref: query.content_ref.as_ref().map(|r| r.as_str().to_string()),
    };

    let json = serde_json::to_string(&cursor).map_err(|e| invalid(e.to_string()))?;

    let mut url = api.as_url().clone();
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair(QUERY_PARAM, &json)
        .append_pair(PAGE_PARAM, &page.to_string());

    Ok(url.to_string())
}

/// Recover the query, with its page number, from a cursor.
///
/// # Errors
///
/// Fails when the cursor is malformed or was issued for another directory.
pub(crate) fn decode(api: &ApiUrl, cursor: &str) -> Result<Query> {
    let url = Url::parse(cursor).map_err(|e| invalid(format!("invalid cursor: {}", e)))?;

    let root = api.as_url();
    if url.scheme() != root.scheme()
        || url.path().trim_end_matches('/') != root.path().trim_end_matches('/')
    {
        return Err(invalid(format!(
            "cursor {} does not belong to {}",
            cursor,
            api.root()
        )));
    }

    let mut encoded = None;
    let mut page = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            QUERY_PARAM => encoded = Some(value.into_owned()),
            PAGE_PARAM => page = Some(value.into_owned()),
            _ => {}
        }
    }

    let encoded = encoded.ok_or_else(|| invalid("cursor has no query"))?;
    let cursor_query: CursorQuery = serde_json::from_str(&encoded)
        .map_err(|e| invalid(format!("invalid cursor query: {}", e)))?;

    let page = match page {
        Some(p) => p
            .parse::<u32>()
            .map_err(|_| invalid(format!("invalid cursor page '{}'", p)))?,
        None => 1,
    };

    Ok(Query {
        predicates: cursor_query
            .predicates
            .into_iter()
            .map(|p| Predicate::at(p.path, p.value))
            .collect(),
        fetch: cursor_query.fetch,
        page_size: cursor_query.page_size,
        page: Some(page),
        orderings: cursor_query
            .orderings
            .into_iter()
            .map(|o| {
                if o.descending {
                    Ordering::desc(o.field)
                } else {
                    Ordering::asc(o.field)
                }
            })
            .collect(),
        after: cursor_query.after,
        content_ref: cursor_query.content_ref.map(ContentRef::new),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacetravel_core::DocumentType;
    use spacetravel_core::content::FIRST_PUBLICATION_DATE;

    fn api() -> ApiUrl {
        ApiUrl::new("file:///srv/content").unwrap()
    }

    #[test]
    fn cursor_carries_query_and_page() {
        let posts = DocumentType::new("posts").unwrap();
        let query = Query::documents(&posts)
            .fetch([posts.field("title")])
            .page_size(2)
            .order_by(Ordering::desc(FIRST_PUBLICATION_DATE))
            .with_ref(Some(ContentRef::new("release-1")));

        let cursor = encode(&api(), &query, 3).unwrap();
        assert!(cursor.starts_with("file:///srv/content?"));

        let decoded = decode(&api(), &cursor).unwrap();
        assert_eq!(decoded, query.page(3));
    }

    #[test]
    fn cursor_for_other_directory_is_rejected() {
        let posts = DocumentType::new("posts").unwrap();
        let other = ApiUrl::new("file:///srv/elsewhere").unwrap();
        let cursor = encode(&other, &Query::documents(&posts), 2).unwrap();

        assert!(decode(&api(), &cursor).is_err());
        assert!(decode(&api(), "https://api/x?page=2").is_err());
    }

    #[test]
    fn cursor_without_query_is_rejected() {
        assert!(decode(&api(), "file:///srv/content?page=2").is_err());
        assert!(decode(&api(), "not a url").is_err());
    }
}
