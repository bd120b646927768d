//! spacetravel-core - Content types, traits and post assemblers for the
//! spacetravelling blog.

pub mod config;
pub mod content;
pub mod dates;
pub mod error;
pub mod pagination;
pub mod posts;
pub mod rich_text;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::{CommentsConfig, SiteConfig};
pub use content::{Document, DocumentPage, Query};
pub use dates::SiteLocale;
pub use error::Error;
pub use pagination::{ListState, LoadOutcome, PostsPagination};
pub use posts::{
    HomePage, Navigation, NavigationRef, PostDetail, PostList, PostPage, PostSummary, get_post,
    list_posts, post_slugs,
};
pub use rich_text::RichText;
pub use tokens::{AccessToken, ContentRef};
pub use traits::{ContentApi, Notice, Notifier};
pub use types::{ApiUrl, DocumentType};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
