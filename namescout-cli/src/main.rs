use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use colored::Colorize;
use namescout::{
    search, search_all_roots, FileMatch, Query, SearchConfig, SearchError, SystemRoots,
};
use std::env;
use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SearchError>;

/// Find files whose names are close to FILE NAME
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search every volume instead of the current directory
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Also print the directory each match was found in
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file, applied on top of the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name to look for; without an extension, files with any extension match
    #[arg(value_name = "FILE NAME")]
    file_name: String,
}

impl Cli {
    /// Plain search of the current directory for `file_name`
    fn for_file_name(file_name: &str) -> Self {
        Cli {
            all: false,
            verbose: false,
            config: None,
            file_name: file_name.to_string(),
        }
    }
}

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Success = 0,
    Usage = 1,
    InvalidFlag = 2,
    WorkingDirectory = 3,
    Config = 4,
    Internal = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

impl From<&SearchError> for Exit {
    fn from(err: &SearchError) -> Self {
        match err {
            SearchError::WorkingDirectory(_) => Exit::WorkingDirectory,
            e if e.is_configuration() => Exit::Config,
            _ => Exit::Internal,
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<OsString> = env::args_os().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(exit) => return exit.into(),
    };

    let config = match SearchConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return Exit::Config.into();
        }
    };

    init_tracing(&config.log_level);

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(&cli, &config) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            Exit::from(&e).into()
        }
    }
}

/// Parses the command line. A single argument is always the name to look
/// for, even one shaped like a flag. With two arguments the first one sits in
/// the flag slot, so anything clap cannot place there is an invalid flag.
fn parse_args(args: &[OsString]) -> std::result::Result<Cli, Exit> {
    let err = match Cli::try_parse_from(args) {
        Ok(cli) => return Ok(cli),
        Err(err) => err,
    };

    let user_args = args.get(1..).unwrap_or(&[]);
    match (err.kind(), user_args) {
        (ErrorKind::DisplayHelp | ErrorKind::DisplayVersion, _) => Err(parse_failure(err)),
        (_, [name]) => match name.to_str() {
            Some(name) => Ok(Cli::for_file_name(name)),
            None => Err(parse_failure(err)),
        },
        (ErrorKind::UnknownArgument | ErrorKind::TooManyValues, [flag, _]) => {
            eprintln!("{} is not a valid flag", flag.to_string_lossy().red());
            Err(Exit::InvalidFlag)
        }
        _ => Err(parse_failure(err)),
    }
}

/// Reports a command-line error and picks the exit code for it
fn parse_failure(err: clap::Error) -> Exit {
    let exit = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Exit::Success,
        ErrorKind::UnknownArgument if is_flag(&err) => Exit::InvalidFlag,
        _ => Exit::Usage,
    };
    // Help goes to stdout, usage errors to stderr
    let _ = err.print();
    exit
}

/// Whether clap rejected something that looks like a flag rather than an
/// extra positional argument
fn is_flag(err: &clap::Error) -> bool {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.starts_with('-'),
        _ => false,
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, config: &SearchConfig) -> Result<()> {
    let query = Query::from_file_name(&cli.file_name, config);
    let target = format!("{}.{}", query.base_name(), query.extension());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let start = Instant::now();
    let mut stream = if cli.all {
        writeln!(out, "Starting search for {} in all files", target.bold())?;
        search_all_roots(query, &SystemRoots, config)?
    } else {
        let dir = env::current_dir().map_err(SearchError::WorkingDirectory)?;
        writeln!(out, "Starting search for {} in {}", target.bold(), dir.display())?;
        search(query, vec![dir], config)?
    };

    while let Some(file_match) = stream.next() {
        if writeln!(out, "{}", render_match(&file_match, cli.verbose)).is_err() {
            // Reader went away; stop the walkers instead of finishing the walk
            stream.cancel();
            return Ok(());
        }
    }
    stream.log_stats();

    writeln!(
        out,
        "Done in: {}",
        humantime::format_duration(start.elapsed()).to_string().dimmed()
    )?;
    Ok(())
}

fn render_match(file_match: &FileMatch, verbose: bool) -> String {
    let line = format!(
        "{} is a {} match",
        file_match.file_name().cyan(),
        format!("{}%", file_match.percent()).green()
    );
    if verbose {
        format!("{} in {}", line, file_match.directory().display())
    } else {
        line
    }
}
