use fuzzdump_core::{Error, ErrorKind, is_validation_error};
use std::process::ExitCode;

pub const EXIT_SUCCESS: u8 = 0;
/// Some files were invalid, but others could be dumped.
pub const EXIT_SOFT: u8 = 1;
/// No valid corpus files were found.
pub const EXIT_EMPTY_CORPUS: u8 = 2;
pub const EXIT_HARD: u8 = 3;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("directory path argument required")]
    NoDirArg,
}

pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_kind(ErrorKind::EmptyCorpus) => EXIT_EMPTY_CORPUS,
        Some(e) if is_validation_error(e) => EXIT_SOFT,
        _ => EXIT_HARD,
    }
}

/// Help and version requests succeed; every other parse failure is a hard
/// failure, so it never reads as an empty corpus.
pub fn usage_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { EXIT_HARD } else { EXIT_SUCCESS }
}

pub fn result_code(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => exit_code(e),
    }
}

pub fn to_exit_code(result: &anyhow::Result<()>) -> ExitCode {
    ExitCode::from(result_code(result))
}
