//! The output directory: where images are written and the only index used
//! to recognise duplicates.
//!
//! Duplicate detection rescans every regular file on each call, so its cost
//! grows with the number and size of stored images.

use crate::error::ImgFetchError;
use crate::verification::ContentDigest;
use eyre::{Result, WrapErr};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the directory, including parents, if it is missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ImgFetchError> {
        let storage = Self::new(root);
        std::fs::create_dir_all(&storage.root).map_err(|e| {
            ImgFetchError::OutputDirectoryCreation {
                path: storage.root.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(storage)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the first stored file whose content digest equals `digest`.
    pub async fn find_duplicate(&self, digest: &ContentDigest) -> Result<Option<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .wrap_err_with(|| format!("Failed to list {}", self.root.display()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .wrap_err_with(|| format!("Failed to list {}", self.root.display()))?
        {
            let file_type = entry
                .file_type()
                .await
                .wrap_err_with(|| format!("Failed to stat {}", entry.path().display()))?;
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let existing = ContentDigest::of_file(&path)
                .await
                .wrap_err_with(|| format!("Failed to hash existing file: {}", path.display()))?;
            tracing::trace!(path = %path.display(), digest = %existing, "Compared stored file");

            if existing == *digest {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Writes `content` to `<root>/<filename>`, replacing any file of that name.
    pub async fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, content)
            .await
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b").join("Fetched_Images");

        let storage = Storage::open(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(storage.root(), root.as_path());
        // Opening an existing directory is a no-op.
        Storage::open(&root).unwrap();
    }

    #[test]
    fn test_open_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("occupied");
        std::fs::write(&root, b"not a directory").unwrap();

        let result = Storage::open(&root);
        assert!(matches!(
            result,
            Err(ImgFetchError::OutputDirectoryCreation { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_duplicate_in_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());

        let found = storage
            .find_duplicate(&ContentDigest::of_bytes(b"anything"))
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_find_duplicate_matches_content_not_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        storage.write("first.png", b"first image").await.unwrap();
        let second = storage.write("second.png", b"second image").await.unwrap();

        let found = storage
            .find_duplicate(&ContentDigest::of_bytes(b"second image"))
            .await
            .unwrap();
        assert_eq!(found, Some(second));

        let missing = storage
            .find_duplicate(&ContentDigest::of_bytes(b"third image"))
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_find_duplicate_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("hidden.png"), b"nested image").unwrap();

        let found = storage
            .find_duplicate(&ContentDigest::of_bytes(b"nested image"))
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_write_overwrites_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());

        storage.write("cat.jpg", b"old").await.unwrap();
        let path = storage.write("cat.jpg", b"new").await.unwrap();

        assert_eq!(path, dir.path().join("cat.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }
}
