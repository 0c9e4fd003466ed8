use std::env;
use std::error;
use std::fmt::{self, Display};
use std::io;

use crate::format;
use crate::slitherlink::SolveError;

pub mod sl_solver;

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    Getopts(getopts::Fail),
    Logger(log::SetLoggerError),
    Format(format::Error),
    Solve(SolveError),
    InvalidSubcommand,
    MissingOption(&'static str),
    UnrecognizedArgument(&'static str),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> CliError {
        CliError::Io(err)
    }
}
impl From<getopts::Fail> for CliError {
    fn from(err: getopts::Fail) -> CliError {
        CliError::Getopts(err)
    }
}
impl From<log::SetLoggerError> for CliError {
    fn from(err: log::SetLoggerError) -> CliError {
        CliError::Logger(err)
    }
}
impl From<format::Error> for CliError {
    fn from(err: format::Error) -> CliError {
        CliError::Format(err)
    }
}
impl From<SolveError> for CliError {
    fn from(err: SolveError) -> CliError {
        CliError::Solve(err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CliError::Io(ref err) => Display::fmt(err, f),
            CliError::Getopts(ref err) => Display::fmt(err, f),
            CliError::Logger(ref err) => Display::fmt(err, f),
            CliError::Format(ref err) => Display::fmt(err, f),
            CliError::Solve(ref err) => Display::fmt(err, f),
            CliError::InvalidSubcommand => write!(f, "invalid subcommand"),
            CliError::MissingOption(opt) => write!(f, "missing a required option '{}'", opt),
            CliError::UnrecognizedArgument(opt) => {
                write!(f, "unrecognized argument for option '{}'", opt)
            }
        }
    }
}

impl error::Error for CliError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            CliError::Io(ref err) => Some(err),
            CliError::Getopts(ref err) => Some(err),
            CliError::Logger(ref err) => Some(err),
            CliError::Format(ref err) => Some(err),
            CliError::Solve(ref err) => Some(err),
            _ => None,
        }
    }
}

// Only the Slitherlink solver exists, so a valid subcommand carries no data.
fn parse_subcommand(subcommand: &str) -> Result<(), CliError> {
    let tokens: Vec<&str> = subcommand.split('-').collect();

    if tokens.len() != 2 {
        return Err(CliError::InvalidSubcommand);
    }

    let puzzle = tokens[0].to_ascii_lowercase();
    let mode = tokens[1].to_ascii_lowercase();
    match (puzzle.as_str(), mode.as_str()) {
        ("sl", "sol") | ("sl", "solver") | ("slitherlink", "sol") | ("slitherlink", "solver") => {
            Ok(())
        }
        _ => Err(CliError::InvalidSubcommand),
    }
}

fn parse_integer_argument(
    matches: &getopts::Matches,
    name: &'static str,
    default: Option<u64>,
    lower_bound: Option<u64>,
) -> Result<u64, CliError> {
    let res = matches
        .opt_str(name)
        .map(|s| {
            s.parse::<u64>()
                .map(Option::Some)
                .map_err(|_| CliError::UnrecognizedArgument(name))
        })
        .unwrap_or(Ok(default))?
        .ok_or(CliError::MissingOption(name))?;
    if !lower_bound.map(|lb| res >= lb).unwrap_or(true) {
        return Err(CliError::UnrecognizedArgument(name));
    }
    Ok(res)
}

/// Like `parse_integer_argument`, but an absent option is `None`.
fn parse_optional_integer_argument(
    matches: &getopts::Matches,
    name: &'static str,
    lower_bound: Option<u64>,
) -> Result<Option<u64>, CliError> {
    if matches.opt_present(name) {
        parse_integer_argument(matches, name, None, lower_bound).map(Some)
    } else {
        Ok(None)
    }
}

/// Dispatches `args[1]` as a subcommand; `args[0]` is the program name.
pub fn run_cli_with(args: &[String]) -> Result<(), CliError> {
    let program = args.get(0).map(|s| s.as_str()).unwrap_or("slither");

    match args.get(1) {
        Some(s) => parse_subcommand(s)?,
        None => return Err(CliError::InvalidSubcommand),
    }
    sl_solver::sl_solver_frontend(&args[2..], program)
}

pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().collect();

    let result = run_cli_with(&args);
    if let Err(ref err) = result {
        eprintln!("error: {}", err);
    }
    result
}
