use crate::corpus_errors::CorpusErrors;
use std::io;
use std::sync::Arc;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Stable identities of the corpus problems a scan knows how to classify.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The entry has no version line or no argument values.
    #[error("must include version and at least one value")]
    MalformedEntry,

    #[error("unsupported encoding version")]
    UnsupportedVersion,

    /// The entry provides a different number of arguments than the first
    /// valid entry did. Go never generates such corpora, but they are
    /// handled all the same.
    #[error("inconsistent arg count in corpus entry")]
    InconsistentArgCount,

    #[error("no valid fuzz corpus files in directory")]
    EmptyCorpus,
}

impl ErrorKind {
    pub const VALIDATION: [ErrorKind; 3] = [
        ErrorKind::MalformedEntry,
        ErrorKind::UnsupportedVersion,
        ErrorKind::InconsistentArgCount,
    ];

    pub fn with_detail(self, detail: impl Into<String>) -> Error {
        Error::Detailed {
            kind: self,
            detail: detail.into(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("{0}")]
    Kind(ErrorKind),

    #[error("{kind}: {detail}")]
    Detailed { kind: ErrorKind, detail: String },

    #[error("reading {name:?}: {source}")]
    Reading { name: String, source: Box<Error> },

    #[error("writing output: {0}")]
    Writing(#[source] Arc<io::Error>),

    #[error(transparent)]
    Io(Arc<io::Error>),

    #[error(transparent)]
    Corpus(CorpusErrors),
}

impl Error {
    /// Reports whether `self` matches `target`, walking through any context
    /// wrappers the way a chain-walking "is-a" check would.
    ///
    /// Aggregates bring their own relation, see [`CorpusErrors::is`].
    pub fn is(&self, target: &Error) -> bool {
        if self.same(target) {
            return true;
        }
        match self {
            Error::Corpus(errs) => errs.is(target),
            Error::Detailed { kind, .. } => Error::Kind(*kind).is(target),
            Error::Reading { source, .. } => source.is(target),
            Error::Writing(e) => Error::Io(Arc::clone(e)).is(target),
            Error::Kind(_) | Error::Io(_) => false,
        }
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.is(&Error::Kind(kind))
    }

    /// Structural identity of a single link in the chain.
    /// Aggregates are never identical to anything, only matched.
    fn same(&self, other: &Error) -> bool {
        match (self, other) {
            (Error::Kind(a), Error::Kind(b)) => a == b,
            (
                Error::Detailed { kind, detail },
                Error::Detailed {
                    kind: other_kind,
                    detail: other_detail,
                },
            ) => kind == other_kind && detail == other_detail,
            (
                Error::Reading { name, source },
                Error::Reading {
                    name: other_name,
                    source: other_source,
                },
            ) => name == other_name && source.same(other_source),
            (Error::Writing(a), Error::Writing(b)) | (Error::Io(a), Error::Io(b)) => {
                a.kind() == b.kind()
            }
            _ => false,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::Kind(kind)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::from(io::Error::from(err))
    }
}

impl From<CorpusErrors> for Error {
    fn from(errs: CorpusErrors) -> Self {
        Error::Corpus(errs)
    }
}

/// Reports whether err is one of the entry validation errors
/// ([`ErrorKind::MalformedEntry`], [`ErrorKind::UnsupportedVersion`] or
/// [`ErrorKind::InconsistentArgCount`]).
pub fn is_validation_error(err: &Error) -> bool {
    ErrorKind::VALIDATION.iter().any(|&kind| err.is_kind(kind))
}

pub(crate) fn reading_err(err: impl Into<Error>, name: &str) -> Error {
    Error::Reading {
        name: name.to_string(),
        source: Box::new(err.into()),
    }
}

pub(crate) fn writing_err(err: io::Error) -> Error {
    Error::Writing(Arc::new(err))
}
