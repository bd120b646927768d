//! Site configuration.

use serde::Serialize;

use crate::dates::SiteLocale;
use crate::tokens::AccessToken;
use crate::types::{ApiUrl, DocumentType};

/// Posts per page on the home page.
pub const DEFAULT_PAGE_SIZE: u32 = 1;

/// Custom type id of blog posts.
pub const DEFAULT_DOCUMENT_TYPE: &str = "posts";

/// Everything the assemblers need to know about the site.
///
/// Passed explicitly into every assembler call and used to build the content
/// backend; there is no process-wide client.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Content API root.
    pub api_url: ApiUrl,
    /// Access token for private repositories.
    pub access_token: Option<AccessToken>,
    /// Display locale for dates.
    pub locale: SiteLocale,
    /// Custom type holding the posts.
    pub document_type: DocumentType,
    /// Posts per home page request.
    pub page_size: u32,
    /// Comment widget embedded below each post.
    pub comments: Option<CommentsConfig>,
}

impl SiteConfig {
    pub fn new(api_url: ApiUrl, document_type: DocumentType) -> Self {
        Self {
            api_url,
            access_token: None,
            locale: SiteLocale::default(),
            document_type,
            page_size: DEFAULT_PAGE_SIZE,
            comments: None,
        }
    }

    pub fn with_access_token(mut self, token: Option<AccessToken>) -> Self {
        self.access_token = token;
        self
    }

    pub fn with_locale(mut self, locale: SiteLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_comments(mut self, comments: Option<CommentsConfig>) -> Self {
        self.comments = comments;
        self
    }
}

/// Reference to the third-party comment widget (utterances).
///
/// The widget loads itself from `script_src` and keys its threads by
/// `issue_term`; only the reference is carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentsConfig {
    pub script_src: String,
    /// GitHub repository holding the comment threads, as `owner/name`.
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
    pub label: Option<String>,
}

impl CommentsConfig {
    pub fn utterances(repo: impl Into<String>) -> Self {
        Self {
            script_src: "https://utteranc.es/client.js".to_string(),
            repo: repo.into(),
            issue_term: "pathname".to_string(),
            theme: "github-dark".to_string(),
            label: None,
        }
    }
}
