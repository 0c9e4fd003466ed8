use std::fs;
use std::io::{self, Read};

use getopts::{Matches, Options};
use log::{info, LevelFilter};

use super::*;
use crate::slitherlink::{self, Engine, SolveError, SolverConfig, Style, Summary};

#[derive(Clone, Debug)]
struct SolverOption {
    input: Option<String>,
    html: bool,
    config: SolverConfig,
    style: Style,
    show_blanks: bool,
    trace: bool,
    verbosity: usize,
}

impl SolverOption {
    fn log_level(&self) -> LevelFilter {
        let level = match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        if self.trace && level < LevelFilter::Info {
            LevelFilter::Info
        } else {
            level
        }
    }
}

fn parse_options(matches: &Matches) -> Result<SolverOption, CliError> {
    let max_rounds =
        parse_optional_integer_argument(matches, "max-rounds", Some(1))?.map(|n| n as usize);
    let shuffle_seed = parse_optional_integer_argument(matches, "seed", None)?;
    let config = SolverConfig {
        max_rounds,
        shuffle_seed,
        allow_closing_edge: matches.opt_present("allow-closing-edge"),
        ..SolverConfig::default()
    };

    if matches.free.len() > 1 {
        return Err(CliError::UnrecognizedArgument("input"));
    }

    Ok(SolverOption {
        input: matches.free.get(0).cloned(),
        html: matches.opt_present("html"),
        config,
        style: if matches.opt_present("ascii") {
            Style::Ascii
        } else {
            Style::Unicode
        },
        show_blanks: matches.opt_present("show-blanks"),
        trace: matches.opt_present("trace"),
        verbosity: matches.opt_count("verbose"),
    })
}

fn setup_logger(level: LevelFilter) -> Result<(), CliError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn read_input(opts: &SolverOption) -> Result<String, CliError> {
    let mut text = match opts.input {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if opts.html {
        text = slitherlink::extract_loop_table(&text)?;
    }
    Ok(text)
}

// The board is drawn whether or not propagation succeeded.
#[derive(Debug)]
struct SolverOutput {
    board: String,
    result: Result<Summary, SolveError>,
}

fn run_solver(opts: &SolverOption, text: &str) -> Result<SolverOutput, CliError> {
    let problem = slitherlink::read_problem(&mut text.as_bytes())?;
    let mut engine = Engine::new(&problem, opts.config)?;

    let result = if opts.trace {
        loop {
            match engine.step() {
                Ok(Some(cell)) => info!("processed cell {:?}", cell),
                Ok(None) => break Ok(engine.summary()),
                Err(err) => break Err(err),
            }
        }
    } else {
        engine.solve()
    };

    let board = slitherlink::render(engine.board(), opts.style, opts.show_blanks).to_string();
    Ok(SolverOutput { board, result })
}

fn options() -> Options {
    let mut options = Options::new();
    options.optflag("", "help", "Show this help menu");
    options.optflag("", "html", "Read the puzzle table out of a web page");
    options.optopt(
        "r",
        "max-rounds",
        "Give up after processing this many cells",
        "1000",
    );
    options.optopt("s", "seed", "Shuffle each batch of pending cells", "42");
    options.optflag(
        "",
        "allow-closing-edge",
        "Allow an edge that closes the only loop on the board",
    );
    options.optflag("a", "ascii", "Draw the board with ASCII characters");
    options.optflag("b", "show-blanks", "Mark blank edges with 'x'");
    options.optflag("t", "trace", "Log every processed cell");
    options.optflagmulti("v", "verbose", "Raise the log level (repeatable)");
    options
}

pub fn sl_solver_frontend(args: &[String], program: &str) -> Result<(), CliError> {
    let options = options();
    let matches = options.parse(args)?;

    if matches.opt_present("help") {
        let brief = format!("Usage: {} sl-sol [options] [FILE]", program);
        print!("{}", options.usage(&brief));
        return Ok(());
    }

    let opts = parse_options(&matches)?;
    setup_logger(opts.log_level())?;

    let text = read_input(&opts)?;
    let output = run_solver(&opts, &text)?;
    print!("{}", output.board);
    let summary = output.result?;
    println!("{}", summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SolverOption, CliError> {
        let matches = options().parse(args)?;
        parse_options(&matches)
    }

    #[test]
    fn test_sl_solver_parse_options() {
        let opts = parse(&["-vv", "--seed", "7", "--ascii", "puzzle.txt"]).unwrap();
        assert_eq!(opts.input, Some("puzzle.txt".to_string()));
        assert_eq!(opts.config.shuffle_seed, Some(7));
        assert_eq!(opts.config.max_rounds, None);
        assert!(!opts.config.allow_closing_edge);
        assert_eq!(opts.style, Style::Ascii);
        assert_eq!(opts.verbosity, 2);
        assert_eq!(opts.log_level(), LevelFilter::Debug);

        let opts = parse(&["--trace", "--max-rounds", "10", "--allow-closing-edge"]).unwrap();
        assert_eq!(opts.input, None);
        assert_eq!(opts.config.max_rounds, Some(10));
        assert!(opts.config.allow_closing_edge);
        assert_eq!(opts.style, Style::Unicode);
        assert_eq!(opts.log_level(), LevelFilter::Info);

        assert!(parse(&["--max-rounds", "0"]).is_err());
        assert!(parse(&["--seed", "-1"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_sl_solver_run() {
        let opts = parse(&["--ascii", "--show-blanks"]).unwrap();
        let output = run_solver(&opts, "2 2\n22\n22\n").unwrap();
        assert_eq!(output.board, "+-+-+\n|2x2|\n+x+x+\n|2x2|\n+-+-+\n");
        let summary = output.result.unwrap();
        assert!(summary.to_string().ends_with(", decided edges: 12/12, lines: 8, solved: yes"));

        let opts = parse(&["--trace"]).unwrap();
        let output = run_solver(&opts, "1 1\n4\n").unwrap();
        assert_eq!(output.board, "┌─┐\n│4│\n└─┘\n");
        assert!(output.result.unwrap().solved);

        // A contradiction still comes with the board as far as it got.
        let output = run_solver(&opts, "2 2\n30\n..\n").unwrap();
        assert!(output.board.contains('3'));
        match output.result {
            Err(SolveError::Contradiction(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }

        match run_solver(&opts, "1 1\n7\n") {
            Err(CliError::Format(crate::format::Error::InvalidClue('7'))) => (),
            res => panic!("unexpected result {:?}", res),
        }

        match run_solver(&opts, "2 2\n22\n2\n") {
            Err(CliError::Format(crate::format::Error::Truncated { expected: 4, found: 3 })) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }
}
