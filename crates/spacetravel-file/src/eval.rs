//! In-memory evaluation of content queries.
//!
//! Supported predicate paths are `document.type`, `document.id`,
//! `my.<type>.uid` and `my.<type>.<field>` for string, number and boolean
//! fields. Orderings accept the two publication dates, `document.id` and
//! `my.<type>.<field>`.

use std::cmp::Ordering as CmpOrdering;

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use spacetravel_core::content::{
    DOCUMENT_ID, DOCUMENT_TYPE, Direction, FIRST_PUBLICATION_DATE, Ordering, Predicate,
};
use spacetravel_core::dates::parse_timestamp;
use spacetravel_core::error::InvalidInputError;
use spacetravel_core::{Document, Result};

const LAST_PUBLICATION_DATE: &str = "document.last_publication_date";

fn unsupported(kind: &str, path: &str) -> spacetravel_core::Error {
    InvalidInputError::Other {
        message: format!("unsupported {} path '{}'", kind, path),
    }
    .into()
}

/// Split `my.<type>.<field>` into its type and field.
fn custom_field(path: &str) -> Option<(&str, &str)> {
    path.strip_prefix("my.")?.split_once('.')
}

/// Returns true if `document` satisfies `predicate`.
pub(crate) fn matches(document: &Document, predicate: &Predicate) -> Result<bool> {
    let Predicate::At { path, value } = predicate;

    match path.as_str() {
        DOCUMENT_TYPE => Ok(document.document_type == *value),
        DOCUMENT_ID => Ok(document.id == *value),
        _ => {
            let (document_type, field) =
                custom_field(path).ok_or_else(|| unsupported("predicate", path))?;

            if document.document_type != document_type {
                return Ok(false);
            }

            if field == "uid" {
                return Ok(document.uid.as_deref() == Some(value.as_str()));
            }

            Ok(match document.get(field) {
                Some(Value::String(s)) => s == value,
                Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string() == *value,
                _ => false,
            })
        }
    }
}

/// A sort key extracted from one document.
#[derive(Debug)]
enum SortKey {
    Date(Option<DateTime<FixedOffset>>),
    Text(Option<String>),
    Field(Option<Value>),
}

impl SortKey {
    fn extract(document: &Document, field: &str) -> Result<Self> {
        let date = |value: &Option<String>| -> Result<SortKey> {
            let parsed = value.as_deref().map(parse_timestamp).transpose()?;
            Ok(SortKey::Date(parsed))
        };

        match field {
            FIRST_PUBLICATION_DATE => date(&document.first_publication_date),
            LAST_PUBLICATION_DATE => date(&document.last_publication_date),
            DOCUMENT_ID => Ok(SortKey::Text(Some(document.id.clone()))),
            _ => {
                let (_, name) = custom_field(field).ok_or_else(|| unsupported("ordering", field))?;
                if name == "uid" {
                    Ok(SortKey::Text(document.uid.clone()))
                } else {
                    Ok(SortKey::Field(document.get(name).cloned()))
                }
            }
        }
    }

    /// Missing values sort first.
    fn compare(&self, other: &Self) -> CmpOrdering {
        match (self, other) {
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Field(a), SortKey::Field(b)) => match (a, b) {
                (None, None) => CmpOrdering::Equal,
                (None, Some(_)) => CmpOrdering::Less,
                (Some(_), None) => CmpOrdering::Greater,
                (Some(a), Some(b)) => compare_values(a, b),
            },
            _ => CmpOrdering::Equal,
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> CmpOrdering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => CmpOrdering::Equal,
    }
}

/// Stable sort by `orderings`, most significant first.
///
/// With no orderings the input order is kept.
pub(crate) fn sort(documents: Vec<Document>, orderings: &[Ordering]) -> Result<Vec<Document>> {
    if orderings.is_empty() {
        return Ok(documents);
    }

    let mut keyed = documents
        .into_iter()
        .map(|document| {
            let keys = orderings
                .iter()
                .map(|o| SortKey::extract(&document, &o.field))
                .collect::<Result<Vec<_>>>()?;
            Ok((keys, document))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| {
        orderings
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|(ordering, (a, b))| match ordering.direction {
                Direction::Ascending => a.compare(b),
                Direction::Descending => b.compare(a),
            })
            .find(|o| *o != CmpOrdering::Equal)
            .unwrap_or(CmpOrdering::Equal)
    });

    Ok(keyed.into_iter().map(|(_, document)| document).collect())
}

/// Keep only the projected data fields of `document`.
///
/// `fetch` entries are `<type>.<field>`; entries for other types are
/// ignored. An empty `fetch` keeps every field.
pub(crate) fn project(mut document: Document, fetch: &[String]) -> Document {
    if fetch.is_empty() {
        return document;
    }

    let keep: Vec<&str> = fetch
        .iter()
        .filter_map(|f| f.split_once('.'))
        .filter(|(document_type, _)| *document_type == document.document_type)
        .map(|(_, field)| field)
        .collect();

    let data = std::mem::take(&mut document.data);
    document.data = data
        .into_iter()
        .filter(|(key, _)| keep.contains(&key.as_str()))
        .collect::<Map<String, Value>>();
    document
}
