//! Structured rich text.
//!
//! A rich text field is an ordered list of blocks (paragraphs, headings,
//! list items, images...). Inline formatting is expressed as spans over
//! the block text, with offsets counted in UTF-16 code units.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A rich text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(Vec<Block>);

/// One block of rich text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block kind: `paragraph`, `heading1`..`heading6`, `preformatted`,
    /// `list-item`, `o-list-item`, `image` or `embed`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub spans: Vec<Span>,

    /// Image source, for `image` blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Image alternative text, for `image` blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// oEmbed payload, for `embed` blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<Value>,
}

/// Inline formatting over `[start, end)` of a block's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,

    /// `strong`, `em`, `hyperlink` or `label`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Block {
    /// Create a block with plain text and no spans.
    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }
}

impl RichText {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Plain text of every block, joined by a single space.
    ///
    /// Image and embed blocks have no text and join as empty strings.
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the field as HTML.
    ///
    /// Consecutive list items are grouped into a single `<ul>` or `<ol>`.
    pub fn as_html(&self) -> String {
        let mut html = String::new();
        let mut open_list: Option<&'static str> = None;

        for block in &self.0 {
            let list = match block.kind.as_str() {
                "list-item" => Some("ul"),
                "o-list-item" => Some("ol"),
                _ => None,
            };

            if open_list != list {
                if let Some(tag) = open_list {
                    html.push_str(&format!("</{}>", tag));
                }
                if let Some(tag) = list {
                    html.push_str(&format!("<{}>", tag));
                }
                open_list = list;
            }

            match block.kind.as_str() {
                "paragraph" => wrap(&mut html, "p", &render_spans(block)),
                "preformatted" => wrap(&mut html, "pre", &render_spans(block)),
                "list-item" | "o-list-item" => wrap(&mut html, "li", &render_spans(block)),
                "image" => {
                    if let Some(url) = &block.url {
                        html.push_str(&format!(
                            "<p class=\"block-img\"><img src=\"{}\" alt=\"{}\" /></p>",
                            escape_html(url),
                            escape_html(block.alt.as_deref().unwrap_or_default())
                        ));
                    }
                }
                "embed" => {
                    let embed = block.oembed.as_ref();
                    let url = embed
                        .and_then(|o| o.get("embed_url"))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    let inner = embed
                        .and_then(|o| o.get("html"))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    html.push_str(&format!(
                        "<div data-oembed=\"{}\">{}</div>",
                        escape_html(url),
                        inner
                    ));
                }
                kind => {
                    let tag = heading_tag(kind).unwrap_or("p");
                    wrap(&mut html, tag, &render_spans(block))
                }
            }
        }

        if let Some(tag) = open_list {
            html.push_str(&format!("</{}>", tag));
        }

        html
    }
}

/// `heading1`..`heading6` map to `h1`..`h6`.
fn heading_tag(kind: &str) -> Option<&'static str> {
    match kind.strip_prefix("heading")? {
        "1" => Some("h1"),
        "2" => Some("h2"),
        "3" => Some("h3"),
        "4" => Some("h4"),
        "5" => Some("h5"),
        "6" => Some("h6"),
        _ => None,
    }
}

fn wrap(html: &mut String, tag: &str, inner: &str) {
    html.push_str(&format!("<{tag}>{inner}</{tag}>"));
}

fn open_tag(span: &Span) -> String {
    match span.kind.as_str() {
        "strong" => "<strong>".to_string(),
        "em" => "<em>".to_string(),
        "hyperlink" => {
            let url = span
                .data
                .as_ref()
                .and_then(|d| d.get("url"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            format!("<a href=\"{}\">", escape_html(url))
        }
        "label" => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.get("label"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            format!("<span class=\"{}\">", escape_html(label))
        }
        _ => "<span>".to_string(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "</span>",
    }
}

fn render_spans(block: &Block) -> String {
    let mut spans: Vec<&Span> = block.spans.iter().filter(|s| s.end > s.start).collect();
    // Longer spans open first so shorter ones nest inside them.
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::new();
    let mut open: Vec<&Span> = Vec::new();
    let mut pending = spans.into_iter().peekable();
    let mut offset = 0;

    for ch in block.text.chars() {
        close_ending(&mut out, &mut open, offset);
        while let Some(span) = pending.next_if(|s| s.start <= offset) {
            out.push_str(&open_tag(span));
            open.push(span);
        }

        match ch {
            '\n' => out.push_str("<br />"),
            _ => push_escaped(&mut out, ch),
        }
        offset += ch.len_utf16();
    }

    close_ending(&mut out, &mut open, usize::MAX);
    out
}

fn close_ending(out: &mut String, open: &mut Vec<&Span>, offset: usize) {
    while let Some(span) = open.last() {
        if span.end > offset {
            break;
        }
        out.push_str(close_tag(span));
        open.pop();
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    s.chars().for_each(|c| push_escaped(&mut out, c));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rich(value: Value) -> RichText {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn as_text_joins_every_block() {
        let body = rich(json!([
            { "type": "paragraph", "text": "Hello world", "spans": [] },
            { "type": "image", "url": "https://images.example.com/a.png" },
            { "type": "list-item", "text": "one item", "spans": [] }
        ]));
        assert_eq!(body.as_text(), "Hello world  one item");
    }

    #[test]
    fn as_html_renders_spans() {
        let body = rich(json!([{
            "type": "paragraph",
            "text": "Read the docs now",
            "spans": [
                { "start": 0, "end": 4, "type": "strong" },
                { "start": 9, "end": 13, "type": "hyperlink", "data": { "link_type": "Web", "url": "https://doc.rust-lang.org" } }
            ]
        }]));
        assert_eq!(
            body.as_html(),
            "<p><strong>Read</strong> the <a href=\"https://doc.rust-lang.org\">docs</a> now</p>"
        );
    }

    #[test]
    fn as_html_nests_overlapping_starts() {
        let body = rich(json!([{
            "type": "heading2",
            "text": "abc",
            "spans": [
                { "start": 0, "end": 1, "type": "em" },
                { "start": 0, "end": 3, "type": "strong" }
            ]
        }]));
        assert_eq!(body.as_html(), "<h2><strong><em>a</em>bc</strong></h2>");
    }

    #[test]
    fn as_html_maps_heading_levels() {
        let body = rich(json!([
            { "type": "heading1", "text": "Title", "spans": [] },
            { "type": "heading6", "text": "Small", "spans": [] },
            { "type": "heading7", "text": "Odd", "spans": [] }
        ]));
        assert_eq!(body.as_html(), "<h1>Title</h1><h6>Small</h6><p>Odd</p>");
    }

    #[test]
    fn as_html_groups_lists_and_escapes() {
        let body = rich(json!([
            { "type": "list-item", "text": "a < b", "spans": [] },
            { "type": "list-item", "text": "c", "spans": [] },
            { "type": "o-list-item", "text": "first", "spans": [] },
            { "type": "paragraph", "text": "line\nbreak", "spans": [] }
        ]));
        assert_eq!(
            body.as_html(),
            "<ul><li>a &lt; b</li><li>c</li></ul><ol><li>first</li></ol><p>line<br />break</p>"
        );
    }

    #[test]
    fn span_offsets_are_utf16() {
        let body = rich(json!([{
            "type": "paragraph",
            "text": "🚀 go",
            "spans": [{ "start": 3, "end": 5, "type": "em" }]
        }]));
        assert_eq!(body.as_html(), "<p>🚀 <em>go</em></p>");
    }
}
