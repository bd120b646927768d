//! Sibling post lookup.

use futures_util::future::try_join;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SiteConfig;
use crate::content::{Document, DocumentPage, FIRST_PUBLICATION_DATE, Ordering, Query};
use crate::error::SchemaError;
use crate::traits::ContentApi;
use crate::Result;

/// Pointer to an adjacent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRef {
    pub uid: String,
    pub title: String,
}

#[derive(Deserialize)]
struct TitleField {
    title: String,
}

impl NavigationRef {
    pub fn from_document(document: &Document) -> Result<Self> {
        let uid = document.uid.clone().ok_or_else(|| SchemaError::Fields {
            id: document.id.clone(),
            reason: "sibling post has no uid".to_string(),
        })?;
        let fields: TitleField = document.fields()?;
        Ok(Self {
            uid,
            title: fields.title,
        })
    }
}

/// The posts published just before and just after a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub previous: Option<NavigationRef>,
    pub next: Option<NavigationRef>,
}

/// Resolve the chronological neighbours of `document`.
///
/// Two single-result queries start after the document: one ordered by first
/// publication date descending (the previous post) and one ascending (the
/// next post). Ties between equal timestamps are broken by the content API.
#[instrument(skip(api, config, document), fields(id = %document.id))]
pub async fn resolve_siblings<C>(
    api: &C,
    config: &SiteConfig,
    document: &Document,
) -> Result<Navigation>
where
    C: ContentApi + ?Sized,
{
    let base = Query::documents(&config.document_type)
        .fetch([config.document_type.field("title")])
        .page_size(1)
        .after(document.id.clone());

    let previous = base.clone().order_by(Ordering::desc(FIRST_PUBLICATION_DATE));
    let next = base.order_by(Ordering::asc(FIRST_PUBLICATION_DATE));

    let (previous, next) = try_join(api.query(&previous), api.query(&next)).await?;

    let navigation = Navigation {
        previous: first_ref(previous)?,
        next: first_ref(next)?,
    };

    debug!(
        previous = navigation.previous.as_ref().map(|r| r.uid.as_str()),
        next = navigation.next.as_ref().map(|r| r.uid.as_str()),
        "Resolved siblings"
    );

    Ok(navigation)
}

fn first_ref(page: DocumentPage) -> Result<Option<NavigationRef>> {
    page.results
        .first()
        .map(NavigationRef::from_document)
        .transpose()
}
