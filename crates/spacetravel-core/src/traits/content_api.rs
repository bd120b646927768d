//! Content API trait.

use async_trait::async_trait;

use crate::Result;
use crate::content::{Document, DocumentPage, Predicate, Query};
use crate::tokens::ContentRef;
use crate::types::{ApiUrl, DocumentType};

/// A source of content documents.
///
/// Implementations validate every response into typed [`Document`]s, so
/// callers never see raw JSON.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Returns the API root this instance reads from.
    fn api_url(&self) -> &ApiUrl;

    /// Run a document query and return the first matching page.
    async fn query(&self, query: &Query) -> Result<DocumentPage>;

    /// Fetch the page behind an opaque `next_page` URL, exactly as given.
    async fn fetch_page(&self, url: &str) -> Result<DocumentPage>;

    /// Fetch a single document by type and uid.
    ///
    /// Returns `Ok(None)` when no document matches.
    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &str,
        content_ref: Option<&ContentRef>,
    ) -> Result<Option<Document>> {
        let query = Query::documents(document_type)
            .and(Predicate::uid(document_type, uid))
            .page_size(1)
            .with_ref(content_ref.cloned());

        let page = self.query(&query).await?;
        Ok(page.results.into_iter().next())
    }
}

#[async_trait]
impl<T: ContentApi + ?Sized> ContentApi for std::sync::Arc<T> {
    fn api_url(&self) -> &ApiUrl {
        (**self).api_url()
    }

    async fn query(&self, query: &Query) -> Result<DocumentPage> {
        (**self).query(query).await
    }

    async fn fetch_page(&self, url: &str) -> Result<DocumentPage> {
        (**self).fetch_page(url).await
    }

    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &str,
        content_ref: Option<&ContentRef>,
    ) -> Result<Option<Document>> {
        (**self).get_by_uid(document_type, uid, content_ref).await
    }
}
