//! Filesystem storage for the file-backed content API.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use spacetravel_core::error::{ApiError, Error, InvalidInputError, SchemaError, TransportError};
use spacetravel_core::{ContentRef, Document, DocumentType, Result};

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::Io {
        message: err.to_string(),
    })
}

/// A directory of published and preview documents.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open the content directory at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn documents_dir(&self) -> PathBuf {
        self.root.join("documents")
    }

    fn previews_dir(&self) -> PathBuf {
        self.root.join("previews")
    }

    /// Directory of one preview revision.
    fn preview_dir(&self, content_ref: &ContentRef) -> Result<PathBuf> {
        let name = content_ref.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(InvalidInputError::Other {
                message: format!("'{}' is not a valid preview ref", name),
            }
            .into());
        }
        Ok(self.previews_dir().join(name))
    }

    /// Returns true if a preview revision named `content_ref` exists.
    pub fn has_preview(&self, content_ref: &ContentRef) -> Result<bool> {
        Ok(self.preview_dir(content_ref)?.is_dir())
    }

    /// Load every document of `document_type`, or of all types when `None`.
    ///
    /// With a `content_ref`, preview documents replace published documents
    /// that share their id and are appended otherwise.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(
        &self,
        document_type: Option<&DocumentType>,
        content_ref: Option<&ContentRef>,
    ) -> Result<Vec<Document>> {
        let mut documents = read_tree(&self.documents_dir(), document_type)?;

        if let Some(content_ref) = content_ref {
            let dir = self.preview_dir(content_ref)?;
            if !dir.is_dir() {
                return Err(ApiError::new(
                    404,
                    Some("ref not found".to_string()),
                    Some(format!("no preview revision named '{}'", content_ref)),
                )
                .into());
            }

            let overrides = read_tree(&dir, document_type)?;
            debug!(count = overrides.len(), %content_ref, "Applying preview documents");

            for document in overrides {
                match documents.iter_mut().find(|d| d.id == document.id) {
                    Some(existing) => *existing = document,
                    None => documents.push(document),
                }
            }
        }

        Ok(documents)
    }

    /// Write a document, as published or into a preview revision.
    ///
    /// The file is named after the document's uid, or its id when it has none.
    #[instrument(skip(self, document), fields(id = %document.id))]
    pub fn put(&self, document: &Document, content_ref: Option<&ContentRef>) -> Result<PathBuf> {
        let document_type = DocumentType::new(document.document_type.as_str())?;
        let base = match content_ref {
            Some(r) => self.preview_dir(r)?,
            None => self.documents_dir(),
        };
        let name = document.uid.as_deref().unwrap_or(&document.id);
        let path = base
            .join(document_type.as_str())
            .join(format!("{}.json", name));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let content = serde_json::to_string_pretty(document).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(map_io)?;
        fs::rename(&temp_path, &path).map_err(map_io)?;

        debug!(path = %path.display(), "Wrote document");

        Ok(path)
    }
}

/// Read the type directories below `base`.
fn read_tree(base: &Path, document_type: Option<&DocumentType>) -> Result<Vec<Document>> {
    if let Some(document_type) = document_type {
        return read_type_dir(&base.join(document_type.as_str()));
    }

    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let mut dirs: Vec<_> = fs::read_dir(base)
        .map_err(map_io)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut documents = Vec::new();
    for dir in dirs {
        documents.extend(read_type_dir(&dir)?);
    }
    Ok(documents)
}

/// Read every `*.json` document in `dir`, in file name order.
fn read_type_dir(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = fs::read_dir(dir)
        .map_err(map_io)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    paths.iter().map(|path| read_document(path)).collect()
}

fn read_document(path: &Path) -> Result<Document> {
    trace!(path = %path.display(), "Reading document");
    let content = fs::read_to_string(path).map_err(map_io)?;
    serde_json::from_str(&content).map_err(|e| {
        SchemaError::Document {
            reason: format!("{}: {}", path.display(), e),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, uid: &str, title: &str) -> Document {
        Document::from_value(json!({
            "id": id,
            "uid": uid,
            "type": "posts",
            "data": { "title": title }
        }))
        .unwrap()
    }

    fn posts() -> DocumentType {
        DocumentType::new("posts").unwrap()
    }

    #[test]
    fn empty_directory_has_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        assert!(store.load(Some(&posts()), None).unwrap().is_empty());
        assert!(store.load(None, None).unwrap().is_empty());
    }

    #[test]
    fn documents_load_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.put(&doc("2", "b-post", "B"), None).unwrap();
        store.put(&doc("1", "a-post", "A"), None).unwrap();

        let ids: Vec<_> = store
            .load(Some(&posts()), None)
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn preview_overrides_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let release = ContentRef::new("release-1");

        store.put(&doc("1", "a-post", "Published"), None).unwrap();
        store.put(&doc("1", "a-post", "Draft"), Some(&release)).unwrap();
        store.put(&doc("9", "z-post", "New"), Some(&release)).unwrap();

        let published = store.load(Some(&posts()), None).unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].get("title"), Some(&json!("Published")));

        let preview = store.load(Some(&posts()), Some(&release)).unwrap();
        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0].get("title"), Some(&json!("Draft")));
        assert_eq!(preview[1].id, "9");
    }

    #[test]
    fn unknown_preview_ref_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let err = store
            .load(None, Some(&ContentRef::new("missing")))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn preview_ref_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        assert!(matches!(
            store.has_preview(&ContentRef::new("../documents")),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn malformed_file_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("documents").join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join("broken.json"), "{ \"id\": 1 }").unwrap();

        let store = DocumentStore::new(dir.path());
        assert!(matches!(
            store.load(Some(&posts()), None),
            Err(Error::SchemaMismatch(_))
        ));
    }
}
