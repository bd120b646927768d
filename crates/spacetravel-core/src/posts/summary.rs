//! Post list assembly.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SiteConfig;
use crate::content::{Document, Query};
use crate::dates::{SiteLocale, format_short_date};
use crate::error::InvalidInputError;
use crate::traits::ContentApi;
use crate::types::DocumentType;
use crate::Result;

/// Page size used when walking every post.
const SLUG_PAGE_SIZE: u32 = 100;

/// A post as shown in the home page list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

#[derive(Deserialize)]
struct SummaryFields {
    title: String,
    subtitle: String,
    author: String,
}

impl PostSummary {
    /// Map a post document into its list shape.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaMismatch`] if `title`, `subtitle` or `author`
    /// is missing or not a string.
    pub fn from_document(document: &Document) -> Result<Self> {
        let fields: SummaryFields = document.fields()?;
        Ok(Self {
            uid: document.uid.clone(),
            first_publication_date: document.first_publication_date.clone(),
            title: fields.title,
            subtitle: fields.subtitle,
            author: fields.author,
        })
    }

    /// First publication date as `dd MMM yyyy`, if published.
    pub fn published_at(&self, locale: SiteLocale) -> Result<Option<String>> {
        self.first_publication_date
            .as_deref()
            .map(|date| format_short_date(date, locale))
            .transpose()
    }
}

/// One page of the post list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostList {
    pub posts: Vec<PostSummary>,
    /// Opaque URL of the next page, if more posts exist.
    pub next_cursor: Option<String>,
}

/// Fields projected by list queries.
pub fn summary_fields(document_type: &DocumentType) -> [String; 3] {
    [
        document_type.field("title"),
        document_type.field("subtitle"),
        document_type.field("author"),
    ]
}

/// Load a page of post summaries.
///
/// Without a cursor this queries the first page of the configured type.
/// With a cursor, the opaque URL is fetched as-is and `page_size` is
/// whatever the cursor encodes.
#[instrument(skip(api, config), fields(document_type = %config.document_type))]
pub async fn list_posts<C>(
    api: &C,
    config: &SiteConfig,
    page_size: u32,
    cursor: Option<&str>,
) -> Result<PostList>
where
    C: ContentApi + ?Sized,
{
    if page_size == 0 {
        return Err(InvalidInputError::PageSize { value: page_size }.into());
    }

    let page = match cursor {
        Some(url) => {
            debug!(%url, "Following list cursor");
            api.fetch_page(url).await?
        }
        None => {
            let query = Query::documents(&config.document_type)
                .fetch(summary_fields(&config.document_type))
                .page_size(page_size);
            api.query(&query).await?
        }
    };

    let posts = page
        .results
        .iter()
        .map(PostSummary::from_document)
        .collect::<Result<Vec<_>>>()?;

    debug!(count = posts.len(), more = page.next_page.is_some(), "Assembled post list");

    Ok(PostList {
        posts,
        next_cursor: page.next_page,
    })
}

/// Every post uid, in query order.
///
/// Follows cursors until the results are exhausted. Documents without a uid
/// have no route and are left out.
#[instrument(skip(api, config), fields(document_type = %config.document_type))]
pub async fn post_slugs<C>(api: &C, config: &SiteConfig) -> Result<Vec<String>>
where
    C: ContentApi + ?Sized,
{
    let query = Query::documents(&config.document_type)
        .fetch([config.document_type.field("title")])
        .page_size(SLUG_PAGE_SIZE);

    let mut page = api.query(&query).await?;
    let mut slugs = Vec::new();

    loop {
        for document in page.results {
            match document.uid {
                Some(uid) => slugs.push(uid),
                None => debug!(id = %document.id, "Skipping document without uid"),
            }
        }

        match page.next_page {
            Some(url) => page = api.fetch_page(&url).await?,
            None => break,
        }
    }

    Ok(slugs)
}
