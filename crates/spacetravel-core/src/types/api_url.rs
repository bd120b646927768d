//! Content API root URL.

use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Root of a content API, or of a local content directory.
///
/// Network roots must be HTTPS; plain HTTP is only accepted for loopback
/// hosts so a local mock can stand in for the CMS.
///
/// ```
/// use spacetravel_core::ApiUrl;
///
/// let api = ApiUrl::new("https://spacetravelling.cdn.prismic.io/api/v2").unwrap();
/// assert_eq!(
///     api.endpoint("documents/search"),
///     "https://spacetravelling.cdn.prismic.io/api/v2/documents/search"
/// );
///
/// let local = ApiUrl::new("file:///tmp/content").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Parse and check an API root.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let reject = |reason: String| -> Error {
            InvalidInputError::ApiUrl {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        let url = Url::parse(s).map_err(|e| reject(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(reject("must be an absolute URL".to_string()));
        }

        match url.scheme() {
            "file" if url.path().is_empty() || url.path() == "/" => {
                Err(reject("file:// URL must name a directory".to_string()))
            }
            "file" => Ok(Self(url)),
            "https" if url.host_str().is_some() => Ok(Self(url)),
            "http" if is_loopback(&url) => Ok(Self(url)),
            _ => Err(reject(
                "must be https://, file://, or http:// on a loopback host".to_string(),
            )),
        }
    }

    /// URL of `path` below the root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.root(), path.trim_start_matches('/'))
    }

    /// The root without a trailing slash.
    pub fn root(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns true for a `file://` content directory.
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// The content directory of a `file://` root.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }
}

fn is_loopback(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cms_root() {
        let api = ApiUrl::new("https://spacetravelling.cdn.prismic.io/api/v2").unwrap();
        assert!(!api.is_local());
        assert_eq!(api.to_string(), "https://spacetravelling.cdn.prismic.io/api/v2");
    }

    #[test]
    fn loopback_http_is_accepted() {
        assert!(ApiUrl::new("http://127.0.0.1:8080/api/v2").is_ok());
        assert!(ApiUrl::new("http://localhost:8080/api/v2").is_ok());
        assert!(ApiUrl::new("http://cms.example.com/api/v2").is_err());
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let api = ApiUrl::new("https://cms.example.com/api/v2/").unwrap();
        assert_eq!(
            api.endpoint("/documents/search"),
            "https://cms.example.com/api/v2/documents/search"
        );
        assert_eq!(api.root(), "https://cms.example.com/api/v2");
    }

    #[test]
    fn rejects_relative_and_unknown_schemes() {
        assert!(ApiUrl::new("/api/v2").is_err());
        assert!(ApiUrl::new("ftp://cms.example.com/api").is_err());
        assert!(ApiUrl::new("file:///").is_err());
    }

    #[test]
    fn content_directory() {
        let api = ApiUrl::new("file:///tmp/content").unwrap();
        assert!(api.is_local());

        #[cfg(unix)]
        assert_eq!(api.to_file_path(), Some(PathBuf::from("/tmp/content")));
    }

    #[test]
    fn network_root_has_no_file_path() {
        let api = ApiUrl::new("https://cms.example.com/api/v2").unwrap();
        assert!(api.to_file_path().is_none());
    }
}
