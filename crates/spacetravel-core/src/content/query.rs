//! Structured content queries.

use std::fmt;

use crate::tokens::ContentRef;
use crate::types::DocumentType;

/// Path of the document type in predicates.
pub const DOCUMENT_TYPE: &str = "document.type";

/// Path of the document id in predicates.
pub const DOCUMENT_ID: &str = "document.id";

/// Ordering field for the first publication date.
pub const FIRST_PUBLICATION_DATE: &str = "document.first_publication_date";

/// A query predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// The value at `path` equals `value`.
    At { path: String, value: String },
}

impl Predicate {
    /// Equality predicate.
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::At {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Matches documents of the given type.
    pub fn document_type(document_type: &DocumentType) -> Self {
        Self::at(DOCUMENT_TYPE, document_type.as_str())
    }

    /// Matches the document of the given type with the given uid.
    pub fn uid(document_type: &DocumentType, uid: &str) -> Self {
        Self::at(format!("my.{}.uid", document_type), uid)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::At { path, value } => {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[at({},\"{}\")]", path, escaped)
            }
        }
    }
}

/// Sort direction of an [`Ordering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Ascending => f.write_str(&self.field),
            Direction::Descending => write!(f, "{} desc", self.field),
        }
    }
}

/// A document query.
///
/// # Example
///
/// ```
/// use spacetravel_core::DocumentType;
/// use spacetravel_core::content::{Ordering, Query, FIRST_PUBLICATION_DATE};
///
/// let posts = DocumentType::new("posts").unwrap();
/// let query = Query::documents(&posts)
///     .fetch([posts.field("title")])
///     .page_size(1)
///     .order_by(Ordering::desc(FIRST_PUBLICATION_DATE));
///
/// assert_eq!(query.q_param(), "[[at(document.type,\"posts\")]]");
/// assert_eq!(query.orderings_param().as_deref(), Some("[document.first_publication_date desc]"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// All predicates must match.
    pub predicates: Vec<Predicate>,
    /// Data fields to project, as `<type>.<field>`. Empty means all fields.
    pub fetch: Vec<String>,
    /// Maximum number of results per page.
    pub page_size: Option<u32>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Sort keys, most significant first.
    pub orderings: Vec<Ordering>,
    /// Only return documents that come after this document id.
    pub after: Option<String>,
    /// Repository revision to read. `None` means the published revision.
    pub content_ref: Option<ContentRef>,
}

impl Query {
    /// Query every document of a type.
    pub fn documents(document_type: &DocumentType) -> Self {
        Self {
            predicates: vec![Predicate::document_type(document_type)],
            ..Self::default()
        }
    }

    /// Add a predicate.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Project only the given data fields.
    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    pub fn after(mut self, document_id: impl Into<String>) -> Self {
        self.after = Some(document_id.into());
        self
    }

    pub fn with_ref(mut self, content_ref: Option<ContentRef>) -> Self {
        self.content_ref = content_ref;
        self
    }

    /// Returns the value of the first equality predicate on `path`.
    pub fn predicate_value(&self, path: &str) -> Option<&str> {
        self.predicates.iter().find_map(|p| match p {
            Predicate::At { path: p, value } if p == path => Some(value.as_str()),
            _ => None,
        })
    }

    /// Renders the predicates as the `q` parameter.
    pub fn q_param(&self) -> String {
        let inner: String = self.predicates.iter().map(ToString::to_string).collect();
        format!("[{}]", inner)
    }

    /// Renders the orderings as the `orderings` parameter.
    pub fn orderings_param(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        let keys: Vec<String> = self.orderings.iter().map(ToString::to_string).collect();
        Some(format!("[{}]", keys.join(",")))
    }

    /// Renders the projection as the `fetch` parameter.
    pub fn fetch_param(&self) -> Option<String> {
        if self.fetch.is_empty() {
            None
        } else {
            Some(self.fetch.join(","))
        }
    }
}
