use clap::{Parser, Subcommand};
use std::ffi::OsString;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    about = "Dump the entries of a Go fuzz test corpus directory (main arguments)"
)]
pub struct FuzzdumpArgs {
    #[clap(
        help = "Fuzz test corpus directory, e.g. ./testdata/fuzz/FuzzMyFunc",
        value_parser = clap::value_parser!(OsString)
    )]
    pub dir: Option<OsString>,

    #[clap(long, help = "Log scan progress to stderr (filter with RUST_LOG)")]
    pub log: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "fuzzdump",
    version = "0.1.0",
    about = "Dump the entries of a Go fuzz test corpus directory",
    long_about = "Dumps the entries of a Go fuzz test corpus directory to the standard output.\n\n\
                  Exit status: 0 success, 1 some files were invalid but others could be dumped, \
                  2 no valid corpus files were found, 3 another critical error occurred.",
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: FuzzdumpArgs,
}
