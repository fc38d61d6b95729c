//! Document store collaborator.
//!
//! A missing document is `Ok(None)`, not an error.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use surco_core::DocumentError;

/// Read-only source of named reference documents.
pub trait DocumentStore: Send + Sync {
    /// Read a document by name.
    ///
    /// # Returns
    /// * `Ok(Some(text))` - The document text
    /// * `Ok(None)` - The document does not exist
    /// * `Err(DocumentError)` - The document exists but could not be read
    fn read_document(&self, name: &str) -> Result<Option<String>, DocumentError>;
}

// ============================================================================
// FILESYSTEM STORE
// ============================================================================

/// Documents stored as UTF-8 files in one directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentStore for FsDocumentStore {
    fn read_document(&self, name: &str) -> Result<Option<String>, DocumentError> {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(DocumentError::InvalidEncoding {
                name: name.to_string(),
            }),
            Err(e) => Err(DocumentError::ReadFailed {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Documents held in memory. Useful for tests and embedded defaults.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, String>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) {
        if let Ok(mut docs) = self.documents.write() {
            docs.insert(name.into(), text.into());
        }
    }

    pub fn with_document(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.documents.write().ok()?.remove(name)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read_document(&self, name: &str) -> Result<Option<String>, DocumentError> {
        let docs = self.documents.read().map_err(|_| DocumentError::ReadFailed {
            name: name.to_string(),
            reason: "document store lock poisoned".to_string(),
        })?;
        Ok(docs.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_store_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("durango-forestal.md"), "## Forestal\n").unwrap();

        let store = FsDocumentStore::new(dir.path());
        let text = store.read_document("durango-forestal.md").unwrap();
        assert_eq!(text.as_deref(), Some("## Forestal\n"));
    }

    #[test]
    fn test_fs_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());
        assert_eq!(store.read_document("durango-ganaderia.md").unwrap(), None);
    }

    #[test]
    fn test_fs_store_invalid_utf8_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0xfd]).unwrap();

        let store = FsDocumentStore::new(dir.path());
        let err = store.read_document("bad.md").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_fs_store_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();

        let store = FsDocumentStore::new(dir.path());
        assert!(store.read_document("nested.md").is_err());
    }

    #[test]
    fn test_in_memory_store_roundtrip() {
        let store = InMemoryDocumentStore::new().with_document("a.md", "alpha");
        assert_eq!(store.read_document("a.md").unwrap().as_deref(), Some("alpha"));
        assert_eq!(store.remove("a.md").as_deref(), Some("alpha"));
        assert_eq!(store.read_document("a.md").unwrap(), None);
    }
}
