//! Dumping of a generated Go fuzzing corpus.
//!
//! The output format of a single-argument corpus is similar to a plain
//! slice with the type omitted, e.g.:
//!
//! ```text
//! {
//!     int(2),
//!     int(3),
//!     int(5),
//! }
//! ```
//!
//! The output format of a multiple-argument corpus is similar to a slice of
//! structs, again, with the type omitted, e.g.:
//!
//! ```text
//! {{
//!     int(8),
//!     string("foo"),
//! }, {
//!     int(13),
//!     string("bar"),
//! }}
//! ```
use crate::corpus_errors::CorpusErrors;
use crate::corpus_fs::CorpusFs;
use crate::entry::{CorpusEntry, read_entry};
use crate::error::{ErrorKind, Result, reading_err};
use crate::output::EntryWriter;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Writes the entries of the fuzz test corpus directory `dir` in `fsys` to
/// `w`.
///
/// The first valid entry determines the number of fuzz arguments all
/// entries should provide and, consequently, whether the output is
/// formatted as a single or multiple argument corpus.
///
/// If the directory has no files, it returns a bare
/// [`ErrorKind::EmptyCorpus`]. If none of the files is valid, the
/// [`ErrorKind::EmptyCorpus`] comes wrapped in [`CorpusErrors`] along with
/// all the validation errors that occurred, and nothing is written.
///
/// Entries that fail validation, or that provide a different number of
/// arguments than initially detected, are not dumped but reported in a
/// [`CorpusErrors`] returned after the whole directory has been processed.
///
/// Any other I/O failure aborts the dump immediately. Check the returned
/// errors with [`crate::Error::is`].
pub fn dump_dir<W, F>(w: &mut W, fsys: &F, dir: &Path) -> Result<()>
where
    W: Write + ?Sized,
    F: CorpusFs + ?Sized,
{
    let mut errs = CorpusErrors::new();

    let files = corpus_files(fsys, dir)?;
    let (first, rest) = first_valid_entry(fsys, dir, &files, &mut errs)?;
    let arity = first.arity();
    info!(file = %first.name, arity, "argument count determined");

    let mut out = EntryWriter::begin(w, arity)?;
    out.entry(&first.values)?;
    dump_entries(&mut out, fsys, dir, rest, arity, &mut errs)?;
    let written = out.finish()?;

    info!(written, skipped = errs.len(), "corpus dumped");
    errs.into_result()
}

/// Lists the regular files in `dir`, failing with
/// [`ErrorKind::EmptyCorpus`] when there are none.
pub fn corpus_files<F: CorpusFs + ?Sized>(fsys: &F, dir: &Path) -> Result<Vec<String>> {
    let files = fsys.list_files(dir)?;
    if files.is_empty() {
        return Err(ErrorKind::EmptyCorpus.into());
    }
    debug!(dir = %dir.display(), count = files.len(), "listed corpus files");
    Ok(files)
}

/// Returns the first valid corpus entry and the files that follow it.
pub fn first_valid_entry<'f, F: CorpusFs + ?Sized>(
    fsys: &F,
    dir: &Path,
    files: &'f [String],
    errs: &mut CorpusErrors,
) -> Result<(CorpusEntry, &'f [String])> {
    for (i, name) in files.iter().enumerate() {
        debug!(file = %name, "probing corpus entry");
        if let Some(entry) = errs.capture_result(read_entry(fsys, dir, name))? {
            return Ok((entry, &files[i + 1..]));
        }
        debug!(file = %name, "skipped invalid corpus entry");
    }
    Err(errs.abort(ErrorKind::EmptyCorpus.into()))
}

/// Writes the entries of the given files to `out`.
///
/// The expected number of fuzz arguments per entry must be determined
/// beforehand; entries that disagree are reported and skipped.
pub fn dump_entries<W, F>(
    out: &mut EntryWriter<'_, W>,
    fsys: &F,
    dir: &Path,
    files: &[String],
    arity: usize,
    errs: &mut CorpusErrors,
) -> Result<()>
where
    W: Write + ?Sized,
    F: CorpusFs + ?Sized,
{
    for name in files {
        let Some(entry) = errs.capture_result(read_entry(fsys, dir, name))? else {
            debug!(file = %name, "skipped invalid corpus entry");
            continue;
        };
        if entry.arity() != arity {
            warn!(file = %name, want = arity, got = entry.arity(), "inconsistent arg count");
            let detail = format!("want {}, got {}", arity, entry.arity());
            errs.capture(reading_err(
                ErrorKind::InconsistentArgCount.with_detail(detail),
                name,
            ))?;
            continue;
        }
        out.entry(&entry.values)?;
    }
    Ok(())
}
