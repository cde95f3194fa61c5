use crate::corpus_fs::CorpusFs;
use crate::error::Result;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// An in-memory [`CorpusFs`].
#[derive(Debug, Default, Clone)]
pub struct MapFs {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: Vec<PathBuf>,
}

impl MapFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, data: impl AsRef<[u8]>) -> Self {
        self.files.insert(clean(Path::new(path)), data.as_ref().to_vec());
        self
    }

    pub fn dir(mut self, path: &str) -> Self {
        self.dirs.push(clean(Path::new(path)));
        self
    }

    fn dir_exists(&self, dir: &Path) -> bool {
        dir.as_os_str().is_empty()
            || self.dirs.iter().any(|d| d == dir)
            || self.files.keys().any(|f| f.starts_with(dir) && f != dir)
    }
}

impl CorpusFs for MapFs {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let dir = clean(dir);
        if !self.dir_exists(&dir) {
            return Err(io::Error::from(io::ErrorKind::NotFound).into());
        }
        Ok(self
            .files
            .keys()
            .filter(|f| f.parent() == Some(dir.as_path()))
            .filter_map(|f| f.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(&clean(path))
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

fn clean(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Fails the writes for which the predicate returns true, passing the
/// rest on to the inner writer.
pub struct PredicateErrWriter<W, P> {
    inner: W,
    message: &'static str,
    predicate: P,
}

impl<W: Write, P: Fn(&[u8]) -> bool> PredicateErrWriter<W, P> {
    pub fn new(inner: W, message: &'static str, predicate: P) -> Self {
        PredicateErrWriter {
            inner,
            message,
            predicate,
        }
    }
}

impl<W: Write, P: Fn(&[u8]) -> bool> Write for PredicateErrWriter<W, P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if (self.predicate)(buf) {
            return Err(io::Error::other(self.message));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
