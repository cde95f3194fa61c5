pub mod args;
pub mod corpus_errors;
pub mod corpus_fs;
pub mod dump;
pub mod entry;
pub mod error;
pub mod output;

#[cfg(test)]
mod test_support;

pub use args::{CliArgs, Command, CompletionArgs, FuzzdumpArgs};
pub use corpus_errors::CorpusErrors;
pub use corpus_fs::{CorpusFs, OsFs};
pub use dump::dump_dir;
pub use entry::{CorpusEntry, ENC_VERSION_1, parse_entry, read_entry};
pub use error::{Error, ErrorKind, Result, is_validation_error};
pub use output::{EntryWriter, MULTI_ARG_SEP, SINGLE_ARG_SEP, Separators};
