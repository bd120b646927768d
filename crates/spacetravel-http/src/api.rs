//! HTTP-backed content API.

use async_trait::async_trait;
use tracing::{debug, instrument};

use spacetravel_core::error::SchemaError;
use spacetravel_core::{
    AccessToken, ApiUrl, ContentApi, ContentRef, DocumentPage, Query, Result, SiteConfig,
};

use crate::client::ApiClient;
use crate::endpoints::{ApiInfoQuery, ApiInfoResponse, RefInfo, SEARCH, SearchQuery};

/// A content API reached over HTTP.
///
/// Queries without an explicit ref read the published content. The master
/// ref is looked up from the API root before every such query, so a newly
/// published revision is visible immediately.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    api: ApiUrl,
    access_token: Option<AccessToken>,
    client: ApiClient,
}

impl HttpContentApi {
    /// Create a backend for the given API root.
    pub fn new(api: ApiUrl, access_token: Option<AccessToken>) -> Result<Self> {
        let client = ApiClient::new(api.clone())?;
        Ok(Self {
            api,
            access_token,
            client,
        })
    }

    /// Create a backend from the site configuration.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.access_token.clone())
    }

    fn token(&self) -> Option<&str> {
        self.access_token.as_ref().map(AccessToken::as_str)
    }

    /// List the repository revisions exposed by the API root.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn refs(&self) -> Result<Vec<RefInfo>> {
        let params = ApiInfoQuery {
            access_token: self.token(),
        };
        let info: ApiInfoResponse = self.client.get_json(self.api.root(), &params).await?;
        Ok(info.refs)
    }

    /// Resolve the ref of the published revision.
    pub async fn master_ref(&self) -> Result<ContentRef> {
        let master = self
            .refs()
            .await?
            .into_iter()
            .find(|r| r.is_master_ref)
            .ok_or_else(|| SchemaError::Response {
                reason: "API root lists no master ref".to_string(),
            })?;

        debug!(id = %master.id, "Resolved master ref");
        Ok(ContentRef::new(master.content_ref))
    }
}

/// Render a query as search parameters.
fn search_params<'a>(
    query: &'a Query,
    content_ref: &'a ContentRef,
    access_token: Option<&'a str>,
) -> SearchQuery<'a> {
    SearchQuery {
        content_ref: content_ref.as_str(),
        q: query.q_param(),
        fetch: query.fetch_param(),
        page_size: query.page_size,
        page: query.page,
        orderings: query.orderings_param(),
        after: query.after.as_deref(),
        access_token,
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    fn api_url(&self) -> &ApiUrl {
        &self.api
    }

    #[instrument(skip(self, query), fields(api = %self.api, q = %query.q_param()))]
    async fn query(&self, query: &Query) -> Result<DocumentPage> {
        let content_ref = match &query.content_ref {
            Some(r) => r.clone(),
            None => self.master_ref().await?,
        };

        debug!(content_ref = %content_ref, "Searching documents");

        let params = search_params(query, &content_ref, self.token());
        let body = self.client.get(&self.api.endpoint(SEARCH), &params).await?;
        DocumentPage::from_slice(&body)
    }

    #[instrument(skip(self), fields(api = %self.api))]
    async fn fetch_page(&self, url: &str) -> Result<DocumentPage> {
        let body = self.client.get_url(url).await?;
        DocumentPage::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacetravel_core::DocumentType;
    use spacetravel_core::content::{FIRST_PUBLICATION_DATE, Ordering, Predicate};

    #[test]
    fn renders_search_params() {
        let posts = DocumentType::new("posts").unwrap();
        let query = Query::documents(&posts)
            .and(Predicate::uid(&posts, "hooks"))
            .fetch([posts.field("title")])
            .page_size(1)
            .order_by(Ordering::desc(FIRST_PUBLICATION_DATE))
            .after("YF9ZSxAAACMAq3Bi");
        let content_ref = ContentRef::new("master");

        let params = serde_json::to_value(search_params(&query, &content_ref, Some("secret")))
            .unwrap();

        assert_eq!(
            params,
            serde_json::json!({
                "ref": "master",
                "q": "[[at(document.type,\"posts\")][at(my.posts.uid,\"hooks\")]]",
                "fetch": "posts.title",
                "pageSize": 1,
                "orderings": "[document.first_publication_date desc]",
                "after": "YF9ZSxAAACMAq3Bi",
                "access_token": "secret"
            })
        );
    }

    #[test]
    fn omits_unset_params() {
        let posts = DocumentType::new("posts").unwrap();
        let query = Query::documents(&posts);
        let content_ref = ContentRef::new("master");

        let params = serde_json::to_value(search_params(&query, &content_ref, None)).unwrap();
        let keys: Vec<_> = params.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"ref".to_string()));
        assert!(keys.contains(&"q".to_string()));
    }
}
