use fuzzdump_core::{CliArgs, Command as CoreCommand, FuzzdumpArgs, OsFs, dump_dir};
mod exit;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use exit::CliError;
use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const PROG: &str = "fuzzdump";

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_logging(enabled: bool) {
    if !enabled {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_dump(w: &mut dyn Write, args: &FuzzdumpArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) if !dir.is_empty() => Path::new(dir),
        _ => return Err(CliError::NoDirArg.into()),
    };
    info!(dir = %dir.display(), "dumping fuzz corpus");
    dump_dir(w, &OsFs::new(dir), Path::new("."))?;
    Ok(())
}

/// The base name the program was invoked as.
fn prog_name(arg0: Option<OsString>) -> String {
    arg0.as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| PROG.to_string())
}

fn report_line(prog: &str, err: &anyhow::Error) -> String {
    format!("{prog}: {err}")
}

fn main() -> ExitCode {
    let cli: CliArgs = match CliArgs::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit::usage_code(&e));
        }
    };

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return ExitCode::SUCCESS;
            }
        }
    }

    let main_app_args = cli.main_opts;
    init_logging(main_app_args.log);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = run_dump(&mut out, &main_app_args);
    drop(out);

    if let Err(e) = &result {
        let prog = prog_name(std::env::args_os().next());
        eprintln!("{}", style(report_line(&prog, e)).red().for_stderr());
    }
    exit::to_exit_code(&result)
}
