//! Post assemblers.
//!
//! These functions turn content documents into display-ready props. Each
//! takes the [`ContentApi`](crate::ContentApi) and [`SiteConfig`](crate::SiteConfig)
//! explicitly.

mod detail;
mod home;
mod navigation;
pub mod reading_time;
mod summary;

pub use detail::{ContentSection, PostDetail, PostPage, get_post};
pub use home::{HomePage, PostListItem};
pub use navigation::{Navigation, NavigationRef, resolve_siblings};
pub use reading_time::reading_time;
pub use summary::{PostList, PostSummary, list_posts, post_slugs, summary_fields};
