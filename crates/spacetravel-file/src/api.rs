//! File-backed content API.

use async_trait::async_trait;
use tracing::{debug, instrument};

use spacetravel_core::content::DOCUMENT_TYPE;
use spacetravel_core::error::InvalidInputError;
use spacetravel_core::{
    ApiUrl, ContentApi, DocumentPage, DocumentType, Query, Result, SiteConfig,
};

use crate::store::DocumentStore;
use crate::{cursor, eval};

/// Results per page when a query sets no page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A content API answered from a local content directory.
///
/// Queries are evaluated in memory over the documents of the selected type.
/// Without orderings, results keep file name order.
#[derive(Debug, Clone)]
pub struct FileContentApi {
    api: ApiUrl,
    store: DocumentStore,
}

impl FileContentApi {
    /// Open the content directory named by a `file://` API URL.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let root = api.to_file_path().ok_or_else(|| InvalidInputError::ApiUrl {
            value: api.to_string(),
            reason: "not a file:// content directory".to_string(),
        })?;

        Ok(Self {
            store: DocumentStore::new(root),
            api,
        })
    }

    /// Create a backend from the site configuration.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Self::new(config.api_url.clone())
    }

    /// Access the underlying document store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    fn run(&self, query: &Query) -> Result<DocumentPage> {
        let document_type = query
            .predicate_value(DOCUMENT_TYPE)
            .map(DocumentType::new)
            .transpose()?;

        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(InvalidInputError::PageSize { value: page_size }.into());
        }
        let page = query.page.unwrap_or(1).max(1);

        let mut documents = Vec::new();
        for document in self
            .store
            .load(document_type.as_ref(), query.content_ref.as_ref())?
        {
            let mut keep = true;
            for predicate in &query.predicates {
                if !eval::matches(&document, predicate)? {
                    keep = false;
                    break;
                }
            }
            if keep {
                documents.push(document);
            }
        }

        let mut documents = eval::sort(documents, &query.orderings)?;

        if let Some(after) = &query.after {
            documents = match documents.iter().position(|d| &d.id == after) {
                Some(index) => documents.split_off(index + 1),
                None => {
                    debug!(%after, "Cursor document not in results");
                    Vec::new()
                }
            };
        }

        let total = documents.len();
        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let end = start.saturating_add(page_size as usize);

        let results = documents
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .map(|d| eval::project(d, &query.fetch))
            .collect();

        let next_page = if end < total {
            Some(cursor::encode(&self.api, query, page + 1)?)
        } else {
            None
        };

        debug!(total, page, more = next_page.is_some(), "Evaluated query");

        Ok(DocumentPage::new(results, next_page))
    }
}

#[async_trait]
impl ContentApi for FileContentApi {
    fn api_url(&self) -> &ApiUrl {
        &self.api
    }

    #[instrument(skip(self, query), fields(root = %self.api, q = %query.q_param()))]
    async fn query(&self, query: &Query) -> Result<DocumentPage> {
        self.run(query)
    }

    #[instrument(skip(self), fields(root = %self.api))]
    async fn fetch_page(&self, url: &str) -> Result<DocumentPage> {
        let query = cursor::decode(&self.api, url)?;
        self.run(&query)
    }
}
