//! Content backend selection.

use async_trait::async_trait;

use spacetravel_core::{ApiUrl, ContentApi, DocumentPage, Query, Result, SiteConfig};
use spacetravel_file::FileContentApi;
use spacetravel_http::HttpContentApi;

/// The content backend named by the API URL.
#[derive(Debug, Clone)]
pub enum CliContent {
    File(FileContentApi),
    Http(HttpContentApi),
}

impl CliContent {
    /// `file://` roots read a local content directory; anything else is HTTP.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        if config.api_url.is_local() {
            Ok(CliContent::File(FileContentApi::from_config(config)?))
        } else {
            Ok(CliContent::Http(HttpContentApi::from_config(config)?))
        }
    }
}

#[async_trait]
impl ContentApi for CliContent {
    fn api_url(&self) -> &ApiUrl {
        match self {
            CliContent::File(api) => api.api_url(),
            CliContent::Http(api) => api.api_url(),
        }
    }

    async fn query(&self, query: &Query) -> Result<DocumentPage> {
        match self {
            CliContent::File(api) => api.query(query).await,
            CliContent::Http(api) => api.query(query).await,
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<DocumentPage> {
        match self {
            CliContent::File(api) => api.fetch_page(url).await,
            CliContent::Http(api) => api.fetch_page(url).await,
        }
    }
}
