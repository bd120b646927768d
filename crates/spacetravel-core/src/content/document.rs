//! Typed content document envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, SchemaError};

/// A content document as returned by the content API.
///
/// The envelope is validated at deserialization time: `id` and `type` must
/// be strings and `data` must be a JSON object. The shape of `data` is left
/// to [`Document::fields`], which callers use with a typed projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    /// Repository-wide document id, used as the `after` cursor.
    pub id: String,

    /// Human-readable unique id (the post slug), when the type defines one.
    pub uid: Option<String>,

    /// Custom type id.
    #[serde(rename = "type")]
    pub document_type: String,

    /// When the document was first published. `None` for unpublished drafts.
    pub first_publication_date: Option<String>,

    /// When the document was last published.
    pub last_publication_date: Option<String>,

    /// Custom type fields.
    pub data: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawDocument {
    id: String,
    #[serde(default)]
    uid: Option<String>,
    #[serde(rename = "type")]
    document_type: String,
    #[serde(default)]
    first_publication_date: Option<String>,
    #[serde(default)]
    last_publication_date: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

impl TryFrom<RawDocument> for Document {
    type Error = SchemaError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let data = match raw.data {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(SchemaError::Document {
                    reason: format!("document {} has a non-object 'data' field", raw.id),
                });
            }
        };

        Ok(Self {
            id: raw.id,
            uid: raw.uid.filter(|uid| !uid.is_empty()),
            document_type: raw.document_type,
            first_publication_date: raw.first_publication_date,
            last_publication_date: raw.last_publication_date,
            data,
        })
    }
}

impl Document {
    /// Validate a raw JSON value as a document.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| {
            SchemaError::Document {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Deserialize the document's `data` into a typed field projection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if a required field is missing or
    /// has the wrong type.
    pub fn fields<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(Value::Object(self.data.clone())).map_err(|e| {
            SchemaError::Fields {
                id: self.id.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Get a field from the document's data.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}
