//! Document Store
//!
//! Directory-backed document listing and content lookup. Content is read
//! from disk on every request.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::preview::{Preview, PreviewFormatter};

/// Errors from document lookups
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document directory {0} does not exist")]
    MissingRoot(PathBuf),
    #[error("invalid document name '{0}'")]
    InvalidName(String),
    #[error("document '{0}' not found")]
    NotFound(String),
    #[error("document '{0}' resolves outside the document directory")]
    OutsideRoot(String),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A document, identified by its file name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Document {
    pub name: String,
}

/// Documents stored as files in one directory
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// Canonical root; symlinks are only followed if they stay under it
    root: PathBuf,
}

impl DocumentStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DocumentError::MissingRoot(root));
        }
        let root = root.canonicalize().map_err(|source| DocumentError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Whether `path` resolves to a file under the root
    fn within_root(&self, path: &Path) -> bool {
        path.canonicalize()
            .is_ok_and(|resolved| resolved.starts_with(&self.root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Regular files directly under the root, sorted by name
    pub fn list(&self) -> Result<Vec<Document>, DocumentError> {
        let entries = std::fs::read_dir(&self.root).map_err(|source| DocumentError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DocumentError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !self.within_root(&path) {
                continue;
            }
            // non-UTF-8 names cannot be addressed by name and are skipped
            if let Ok(name) = entry.file_name().into_string() {
                documents.push(Document { name });
            }
        }

        documents.sort();
        Ok(documents)
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, DocumentError> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || name.contains('\0');
        if invalid {
            return Err(DocumentError::InvalidName(name.to_string()));
        }

        let path = self.root.join(name);
        if !path.is_file() {
            return Err(DocumentError::NotFound(name.to_string()));
        }
        if !self.within_root(&path) {
            return Err(DocumentError::OutsideRoot(name.to_string()));
        }
        Ok(path)
    }

    /// Read the current content of `name`
    pub fn content(&self, name: &str) -> Result<String, DocumentError> {
        let path = self.resolve(name)?;
        log::debug!("Reading document {}", path.display());

        let bytes = std::fs::read(&path).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fetch `name` and render it
    pub fn preview(
        &self,
        name: &str,
        formatter: &PreviewFormatter,
    ) -> Result<Preview, DocumentError> {
        let content = self.content(name)?;
        Ok(formatter.render(&content, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        for name in ["", ".", "..", "../secret", "a/b", "a\\b"] {
            assert!(
                matches!(store.content(name), Err(DocumentError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_out_of_root_is_rejected() {
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, "hidden").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("real.md"), "# ok").unwrap();
        std::os::unix::fs::symlink(&secret, dir.path().join("link.txt")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.md"), dir.path().join("alias.md"))
            .unwrap();

        let store = DocumentStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.content("link.txt"),
            Err(DocumentError::OutsideRoot(_))
        ));
        assert_eq!(store.content("alias.md").unwrap(), "# ok");

        let names: Vec<String> = store.list().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["alias.md", "real.md"]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            DocumentStore::open(&missing),
            Err(DocumentError::MissingRoot(_))
        ));
    }
}
