//! Document type identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated content document type (custom type API id), such as `posts`.
///
/// Type ids appear inside query predicates (`my.posts.uid`) and field
/// projections (`posts.title`), so they are restricted to lowercase ASCII
/// letters, digits, `_` and `-`, starting with a letter.
///
/// # Example
///
/// ```
/// use spacetravel_core::DocumentType;
///
/// let posts = DocumentType::new("posts").unwrap();
/// assert_eq!(posts.field("title"), "posts.title");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentType(String);

impl DocumentType {
    /// Create a new document type, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the type id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the projection path of a data field of this type.
    pub fn field(&self, name: &str) -> String {
        format!("{}.{}", self.0, name)
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::DocumentType {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let Some(first) = s.chars().next() else {
            return Err(invalid("cannot be empty"));
        };

        if !first.is_ascii_lowercase() {
            return Err(invalid("must start with a lowercase letter"));
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(invalid(
                "may only contain lowercase letters, digits, '_' and '-'",
            ));
        }

        Ok(())
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        value.0
    }
}

impl AsRef<str> for DocumentType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_types() {
        assert!(DocumentType::new("posts").is_ok());
        assert!(DocumentType::new("blog_post").is_ok());
        assert!(DocumentType::new("page-2").is_ok());
    }

    #[test]
    fn invalid_types() {
        assert!(DocumentType::new("").is_err());
        assert!(DocumentType::new("Posts").is_err());
        assert!(DocumentType::new("2posts").is_err());
        assert!(DocumentType::new("posts\")]").is_err());
    }

    #[test]
    fn serde_validates() {
        let ok: DocumentType = serde_json::from_str("\"posts\"").unwrap();
        assert_eq!(ok.as_str(), "posts");
        assert!(serde_json::from_str::<DocumentType>("\"my.posts\"").is_err());
    }
}
