use crate::error::{Error, ErrorKind, Result, is_validation_error};
use std::fmt;

/// A collection of errors found in a fuzz corpus while reading it.
///
/// Validation problems are collected so that a single scan can report all
/// of them at once, while anything that makes the corpus unusable still
/// aborts the scan, see [`CorpusErrors::capture`].
///
/// The last error is distinguished: a plain target is matched against it,
/// and [`CorpusErrors::unwrap`] drops it.
#[derive(Debug, Clone, Default)]
pub struct CorpusErrors(Vec<Error>);

impl CorpusErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures non-critical errors and passes critical ones back.
    ///
    /// When err is one of the entry validation errors, it is appended and
    /// `Ok(())` is returned.
    ///
    /// When err is [`ErrorKind::EmptyCorpus`], it is appended as well, but
    /// since the corpus is not usable then, the whole collection is
    /// returned as the error instead.
    ///
    /// When err is another [`CorpusErrors`], each of the errors it holds is
    /// captured in turn, stopping at the first one that is passed back.
    ///
    /// Any other error is passed back as it is.
    pub fn capture(&mut self, err: Error) -> Result<()> {
        match err {
            Error::Corpus(errs) => {
                for err in errs.0 {
                    self.capture(err)?;
                }
                Ok(())
            }
            err if is_validation_error(&err) => {
                self.0.push(err);
                Ok(())
            }
            err if err.is_kind(ErrorKind::EmptyCorpus) => Err(self.abort(err)),
            err => Err(err),
        }
    }

    /// Captures the error of a failed result, passing successful values
    /// through.
    ///
    /// `Ok(None)` means the error was absorbed and the caller should move
    /// on.
    pub fn capture_result<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(v) => Ok(Some(v)),
            Err(err) => self.capture(err).map(|()| None),
        }
    }

    /// Appends err and returns the collection as the error to abort with.
    pub fn abort(&mut self, err: Error) -> Error {
        self.0.push(err);
        Error::Corpus(self.clone())
    }

    /// Returns `Ok(())` when no errors were collected, otherwise the
    /// collection itself.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Corpus(self))
        }
    }

    /// Returns the collection without its last error, or `None` if nothing
    /// would be left.
    pub fn unwrap(&self) -> Option<CorpusErrors> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(CorpusErrors(rest.to_vec())),
            _ => None,
        }
    }

    /// Reports whether target matches these errors.
    ///
    /// When target is itself a [`CorpusErrors`], both being empty is a
    /// match, exactly one being empty is not, and otherwise every error in
    /// target has to match some error here. A plain target is compared with
    /// the last error, then with each earlier one in turn.
    pub fn is(&self, target: &Error) -> bool {
        chain_is(&self.0, target)
    }

    pub fn last(&self) -> Option<&Error> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }
}

/// Matches `errs`, then each shorter prefix of it, against target.
fn chain_is(mut errs: &[Error], target: &Error) -> bool {
    loop {
        if direct_is(errs, target) {
            return true;
        }
        match errs.split_last() {
            Some((_, rest)) if !rest.is_empty() => errs = rest,
            _ => return false,
        }
    }
}

fn direct_is(errs: &[Error], target: &Error) -> bool {
    if let Error::Corpus(target) = target {
        // An empty target only matches an empty collection.
        if errs.is_empty() || target.is_empty() {
            return errs.is_empty() == target.is_empty();
        }
        return target.iter().all(|t| chain_is(errs, t));
    }
    errs.last().is_some_and(|last| last.is(target))
}

impl fmt::Display for CorpusErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no fuzz corpus errors");
        }
        f.write_str("fuzz corpus has errors:")?;
        for err in &self.0 {
            write!(f, "\n\t{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CorpusErrors {}

impl From<Vec<Error>> for CorpusErrors {
    fn from(errs: Vec<Error>) -> Self {
        CorpusErrors(errs)
    }
}

impl<'a> IntoIterator for &'a CorpusErrors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::reading_err;
    use std::io;

    fn snap() -> Error {
        io::Error::other("snap").into()
    }

    fn whoops() -> Error {
        io::Error::new(io::ErrorKind::InvalidData, "whoops").into()
    }

    fn errs(list: Vec<Error>) -> Error {
        Error::Corpus(list.into())
    }

    #[test]
    fn capture_keeps_going_past_validation_errors() {
        let mut e = CorpusErrors::new();
        let mut reached = false;
        let mut run = || -> Result<()> {
            e.capture(reading_err(ErrorKind::MalformedEntry, "foo"))?;
            e.capture(reading_err(ErrorKind::UnsupportedVersion, "bar"))?;
            reached = true;
            Ok(())
        };
        assert!(run().is_ok());
        assert!(reached);
        assert_eq!(
            e.into_result().unwrap_err().to_string(),
            "fuzz corpus has errors:\n\
             \treading \"foo\": must include version and at least one value\n\
             \treading \"bar\": unsupported encoding version"
        );
    }

    #[test]
    fn capture_classifies_candidates() {
        struct Case {
            name: &'static str,
            err: Error,
            want: Option<Error>,
            want_len: usize,
        }
        let cases = vec![
            Case {
                name: "aggregate of critical",
                err: errs(vec![snap()]),
                want: Some(snap()),
                want_len: 0,
            },
            Case {
                name: "aggregate of malformed",
                err: errs(vec![ErrorKind::MalformedEntry.into()]),
                want: None,
                want_len: 1,
            },
            Case {
                name: "aggregate ending in empty corpus",
                err: errs(vec![
                    ErrorKind::UnsupportedVersion.into(),
                    ErrorKind::EmptyCorpus.into(),
                ]),
                want: Some(ErrorKind::EmptyCorpus.into()),
                want_len: 2,
            },
            Case {
                name: "inconsistent arg count",
                err: ErrorKind::InconsistentArgCount.into(),
                want: None,
                want_len: 1,
            },
            Case {
                name: "critical",
                err: snap(),
                want: Some(snap()),
                want_len: 0,
            },
        ];
        for case in cases {
            let mut e = CorpusErrors::new();
            let got = e.capture(case.err);
            match (&case.want, got) {
                (None, Ok(())) => {}
                (Some(want), Err(got)) => assert!(got.is(want), "{}: got {got}", case.name),
                (want, got) => panic!("{}: want {want:?}, got {got:?}", case.name),
            }
            assert_eq!(e.len(), case.want_len, "{}", case.name);
        }
    }

    #[test]
    fn capture_stops_at_first_critical_element() {
        let mut e = CorpusErrors::new();
        let got = e.capture(errs(vec![
            ErrorKind::MalformedEntry.into(),
            snap(),
            ErrorKind::UnsupportedVersion.into(),
        ]));
        assert!(got.unwrap_err().is(&snap()));
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn capture_empty_corpus_yields_the_whole_collection() {
        let mut e: CorpusErrors = vec![Error::from(ErrorKind::UnsupportedVersion)].into();
        let got = e.capture(ErrorKind::EmptyCorpus.into()).unwrap_err();
        let Error::Corpus(got) = got else {
            panic!("want aggregate, got {got:?}");
        };
        assert_eq!(got.len(), 2);
        assert_eq!(e.len(), 2);
        assert!(got.is(&Error::Corpus(e.clone())));
        assert!(e.is(&Error::Corpus(got)));
    }

    #[test]
    fn capture_result_passes_values_through() {
        let mut e = CorpusErrors::new();
        assert_eq!(e.capture_result(Ok(3)).unwrap(), Some(3));
        assert_eq!(
            e.capture_result::<i32>(Err(ErrorKind::MalformedEntry.into()))
                .unwrap(),
            None
        );
        assert!(e.capture_result::<i32>(Err(snap())).is_err());
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn display() {
        assert_eq!(CorpusErrors::new().to_string(), "no fuzz corpus errors");
        let one: CorpusErrors = vec![snap()].into();
        assert_eq!(one.to_string(), "fuzz corpus has errors:\n\tsnap");
        let two: CorpusErrors = vec![snap(), whoops()].into();
        assert_eq!(two.to_string(), "fuzz corpus has errors:\n\tsnap\n\twhoops");
    }

    #[test]
    fn unwrap_drops_the_last_error() {
        assert!(CorpusErrors::new().unwrap().is_none());
        let one: CorpusErrors = vec![snap()].into();
        assert!(one.unwrap().is_none());
        let two: CorpusErrors = vec![snap(), whoops()].into();
        let rest = two.unwrap().unwrap();
        assert_eq!(rest.len(), 1);
        assert!(rest.last().unwrap().is(&snap()));
    }

    #[test]
    fn into_result_of_empty_is_ok() {
        assert!(CorpusErrors::new().into_result().is_ok());
    }

    #[test]
    fn matching_is_set_like() {
        let a = || Error::from(ErrorKind::MalformedEntry);
        let b = || Error::from(ErrorKind::UnsupportedVersion);
        let c = || Error::from(ErrorKind::InconsistentArgCount);
        let ab: CorpusErrors = vec![a(), b()].into();

        assert!(ab.is(&errs(vec![a()])));
        assert!(ab.is(&errs(vec![b()])));
        assert!(ab.is(&errs(vec![b(), a()])));
        assert!(!ab.is(&errs(vec![a(), b(), c()])));
        assert!(!ab.is(&errs(vec![])));
        assert!(ab.is(&a()));
        assert!(ab.is(&b()));
        assert!(!ab.is(&c()));
    }

    #[test]
    fn empty_matches_only_empty() {
        let empty = CorpusErrors::new();
        assert!(empty.is(&errs(vec![])));
        assert!(!empty.is(&errs(vec![snap()])));
        assert!(!empty.is(&snap()));
    }

    #[test]
    fn matching_sees_through_wrappers() {
        let wrapped: CorpusErrors = vec![reading_err(snap(), "foo")].into();
        assert!(wrapped.is(&snap()));
        assert!(wrapped.is(&errs(vec![snap()])));
        assert!(wrapped.is(&errs(vec![reading_err(snap(), "foo")])));
        assert!(!wrapped.is(&reading_err(snap(), "bar")));

        let plain: CorpusErrors = vec![snap()].into();
        assert!(!plain.is(&reading_err(snap(), "foo")));
    }

    #[test]
    fn wrapped_aggregate_matches_its_elements() {
        let err = reading_err(errs(vec![snap(), whoops()]), "dir");
        assert!(err.is(&snap()));
        assert!(err.is(&whoops()));
        assert!(err.is(&errs(vec![whoops()])));
        assert!(err.is(&errs(vec![snap(), whoops()])));
        assert!(!err.is(&errs(vec![])));
    }
}
