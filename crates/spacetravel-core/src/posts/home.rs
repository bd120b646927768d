//! Home page props.

use serde::Serialize;

use super::{PostList, PostSummary};
use crate::dates::SiteLocale;
use crate::Result;

/// A list entry with its display date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostListItem {
    #[serde(flatten)]
    pub post: PostSummary,
    pub published_at: Option<String>,
}

/// Props of the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub posts: Vec<PostListItem>,
    /// Cursor for the "load more" control; `None` hides it.
    pub next_page: Option<String>,
    pub preview: bool,
}

impl HomePage {
    pub fn new(list: &PostList, locale: SiteLocale, preview: bool) -> Result<Self> {
        let posts = list
            .posts
            .iter()
            .map(|post| -> Result<PostListItem> {
                Ok(PostListItem {
                    published_at: post.published_at(locale)?,
                    post: post.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            posts,
            next_page: list.next_cursor.clone(),
            preview,
        })
    }
}
