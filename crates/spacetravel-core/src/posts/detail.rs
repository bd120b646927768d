//! Post detail assembly.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::navigation::{Navigation, resolve_siblings};
use super::reading_time::reading_time;
use crate::config::{CommentsConfig, SiteConfig};
use crate::content::Document;
use crate::dates::{SiteLocale, format_date_time, format_short_date};
use crate::error::Error;
use crate::rich_text::RichText;
use crate::tokens::ContentRef;
use crate::traits::ContentApi;
use crate::Result;

/// One titled section of a post body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: RichText,
    /// `body` rendered as HTML.
    pub body_html: String,
}

impl ContentSection {
    pub fn new(heading: impl Into<String>, body: RichText) -> Self {
        let body_html = body.as_html();
        Self {
            heading: heading.into(),
            body,
            body_html,
        }
    }
}

/// A post ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub title: String,
    pub banner_url: Option<String>,
    pub author: String,
    pub content: Vec<ContentSection>,
    /// Estimated reading time, as `<n> min`.
    pub reading_time: String,
    /// First publication date as `dd MMM yyyy`.
    pub published_at: Option<String>,
    /// Last publication date as `dd MMM yyyy, HH:mm`, present only when the
    /// post was edited after it was first published.
    pub updated_at: Option<String>,
}

#[derive(Deserialize)]
struct PostFields {
    title: String,
    #[serde(default)]
    banner: Banner,
    author: String,
    #[serde(default)]
    content: Vec<SectionFields>,
}

/// Image field. An empty image is `{}`.
#[derive(Deserialize, Default)]
struct Banner {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct SectionFields {
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    body: RichText,
}

impl PostDetail {
    /// Map a post document into its display shape.
    pub fn from_document(document: &Document, locale: SiteLocale) -> Result<Self> {
        let fields: PostFields = document.fields()?;

        let content: Vec<ContentSection> = fields
            .content
            .into_iter()
            .map(|s| ContentSection::new(s.heading.unwrap_or_default(), s.body))
            .collect();

        let published_at = document
            .first_publication_date
            .as_deref()
            .map(|date| format_short_date(date, locale))
            .transpose()?;

        let updated_at = match (
            &document.first_publication_date,
            &document.last_publication_date,
        ) {
            (first, Some(last)) if first.as_ref() != Some(last) => {
                Some(format_date_time(last, locale)?)
            }
            _ => None,
        };

        Ok(Self {
            uid: document.uid.clone(),
            first_publication_date: document.first_publication_date.clone(),
            last_publication_date: document.last_publication_date.clone(),
            title: fields.title,
            banner_url: fields.banner.url,
            author: fields.author,
            reading_time: reading_time(&content),
            content,
            published_at,
            updated_at,
        })
    }
}

/// Props of a post page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub post: PostDetail,
    pub navigation: Navigation,
    /// True when the post was read through a preview ref.
    pub preview: bool,
    pub comments: Option<CommentsConfig>,
}

/// Load a post by slug, with its sibling navigation.
///
/// The post itself is read through `preview_ref` when given; siblings always
/// come from the published content.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when no post has uid `slug`.
#[instrument(skip(api, config), fields(document_type = %config.document_type))]
pub async fn get_post<C>(
    api: &C,
    config: &SiteConfig,
    slug: &str,
    preview_ref: Option<&ContentRef>,
) -> Result<PostPage>
where
    C: ContentApi + ?Sized,
{
    let document = api
        .get_by_uid(&config.document_type, slug, preview_ref)
        .await?
        .ok_or_else(|| Error::NotFound {
            document_type: config.document_type.to_string(),
            uid: slug.to_string(),
        })?;

    debug!(id = %document.id, "Found post");

    let post = PostDetail::from_document(&document, config.locale)?;
    let navigation = resolve_siblings(api, config, &document).await?;

    Ok(PostPage {
        post,
        navigation,
        preview: preview_ref.is_some(),
        comments: config.comments.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn post_document(first: Option<&str>, last: Option<&str>) -> Document {
        Document::from_value(json!({
            "id": "YF9ZSxAAACMAq3Bi",
            "uid": "como-utilizar-hooks",
            "type": "posts",
            "first_publication_date": first,
            "last_publication_date": last,
            "data": {
                "title": "Como utilizar Hooks",
                "author": "Joseph Oliveira",
                "banner": { "url": "https://images.prismic.io/banner.png", "alt": null },
                "content": [
                    {
                        "heading": "Proin et varius",
                        "body": [
                            { "type": "paragraph", "text": "Nullam dolor sapien", "spans": [] }
                        ]
                    }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn maps_post_fields() {
        let doc = post_document(
            Some("2021-03-25T19:25:28+0000"),
            Some("2021-03-25T19:25:28+0000"),
        );
        let post = PostDetail::from_document(&doc, SiteLocale::PtBr).unwrap();

        assert_eq!(post.title, "Como utilizar Hooks");
        assert_eq!(post.banner_url.as_deref(), Some("https://images.prismic.io/banner.png"));
        assert_eq!(post.content.len(), 1);
        assert_eq!(post.content[0].body_html, "<p>Nullam dolor sapien</p>");
        assert_eq!(post.reading_time, "1 min");
        assert_eq!(post.published_at.as_deref(), Some("25 mar 2021"));
        assert_eq!(post.updated_at, None);
    }

    #[test]
    fn edited_post_has_updated_at() {
        let doc = post_document(
            Some("2021-03-25T19:25:28+0000"),
            Some("2021-03-27T10:05:00+0000"),
        );
        let post = PostDetail::from_document(&doc, SiteLocale::PtBr).unwrap();
        assert_eq!(post.updated_at.as_deref(), Some("27 mar 2021, 10:05"));
    }

    #[test]
    fn draft_has_no_dates() {
        let doc = post_document(None, None);
        let post = PostDetail::from_document(&doc, SiteLocale::PtBr).unwrap();
        assert_eq!(post.published_at, None);
        assert_eq!(post.updated_at, None);
    }

    #[test]
    fn malformed_date_is_propagated() {
        let doc = post_document(Some("25/03/2021"), None);
        assert!(matches!(
            PostDetail::from_document(&doc, SiteLocale::PtBr),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn empty_banner_and_content() {
        let mut doc = post_document(None, None);
        doc.data.insert("banner".into(), json!({}));
        doc.data.insert("content".into(), Value::Array(vec![]));

        let post = PostDetail::from_document(&doc, SiteLocale::EnUs).unwrap();
        assert_eq!(post.banner_url, None);
        assert_eq!(post.reading_time, "0 min");
    }
}
