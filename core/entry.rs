use crate::corpus_fs::CorpusFs;
use crate::error::{ErrorKind, Result, reading_err};
use std::path::Path;

/// The first line of a file with version 1 encoding.
pub const ENC_VERSION_1: &str = "go test fuzz v1";

/// The argument values decoded from one corpus file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub name: String,
    pub values: Vec<Vec<u8>>,
}

impl CorpusEntry {
    pub fn arity(&self) -> usize {
        self.values.len()
    }
}

/// Decodes the argument value lines of a single corpus entry.
pub fn parse_entry(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut lines = data.split(|&b| b == b'\n');
    let (Some(first), Some(rest_start)) = (lines.next(), lines.next()) else {
        return Err(ErrorKind::MalformedEntry.into());
    };

    let version = first.strip_suffix(b"\r").unwrap_or(first);
    if version != ENC_VERSION_1.as_bytes() {
        let seen = String::from_utf8_lossy(version);
        return Err(ErrorKind::UnsupportedVersion.with_detail(format!("{seen:?}")));
    }

    let values: Vec<Vec<u8>> = std::iter::once(rest_start)
        .chain(lines)
        .map(trim_space)
        .filter(|line| !line.is_empty())
        .map(<[u8]>::to_vec)
        .collect();
    if values.is_empty() {
        return Err(ErrorKind::MalformedEntry.into());
    }
    Ok(values)
}

/// Trims leading and trailing Unicode whitespace off a value line.
///
/// Lines that are not valid UTF-8 are trimmed of ASCII whitespace and
/// vertical tabs only.
fn trim_space(line: &[u8]) -> &[u8] {
    if let Ok(s) = std::str::from_utf8(line) {
        return s.trim().as_bytes();
    }
    let is_space = |b: &u8| b.is_ascii_whitespace() || *b == b'\x0b';
    let start = line.iter().position(|b| !is_space(b)).unwrap_or(line.len());
    let end = line.iter().rposition(|b| !is_space(b)).map_or(start, |i| i + 1);
    &line[start..end]
}

/// Reads and decodes the corpus file `name` in `dir`.
///
/// Both read failures and validation errors come back wrapped with the
/// file name, but only the latter are ever captured by a scan.
pub fn read_entry<F: CorpusFs + ?Sized>(fsys: &F, dir: &Path, name: &str) -> Result<CorpusEntry> {
    let data = fsys
        .read(&dir.join(name))
        .map_err(|e| reading_err(e, name))?;
    let values = parse_entry(&data).map_err(|e| reading_err(e, name))?;
    Ok(CorpusEntry {
        name: name.to_string(),
        values,
    })
}
