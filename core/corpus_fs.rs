use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The file system a corpus is read from.
///
/// Paths are relative to whatever root the implementation is anchored at.
pub trait CorpusFs {
    /// Returns the names of the regular files directly in `dir`, ordered by
    /// name.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;

    /// Returns the whole contents of the file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// A [`CorpusFs`] rooted at a directory of the host file system.
#[derive(Debug, Clone)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OsFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CorpusFs for OsFs {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let walker = WalkDir::new(self.root.join(dir))
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            // Symlinks are not followed, so they never count as regular.
            if entry.file_type().is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(files)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(path))
    }
}
