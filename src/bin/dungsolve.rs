//! `dungsolve`: an ICCMA-style command-line reasoning engine for abstract
//! argumentation frameworks (see the `dungsolve` library crate for the
//! actual solving logic).

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use dungsolve::engine;
use dungsolve::parser;
use dungsolve::task::{self, Backend, Format, RunOptions, Track, ALL_TRACKS};
use dungsolve::{Answer, DungError};

/// An ICCMA-style reasoning engine for abstract argumentation frameworks.
#[derive(Parser, Debug)]
#[command(name = "dungsolve", version, about)]
struct Cli {
    /// Problem/semantics track, e.g. `DC-PR`, `SE-ST`, `CE-CO`.
    #[arg(short = 'p', long = "problem")]
    problem: Option<String>,

    /// Input file (`-` or omitted reads from stdin).
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Input format: `i23` or `tgf`.
    #[arg(long = "fo", alias = "format")]
    format: Option<String>,

    /// Query argument name, required by `DC-*`/`DS-*` tracks.
    #[arg(short = 'a', long = "argument")]
    argument: Option<String>,

    /// Path to an external DIMACS SAT solver binary; selects the process back-end.
    #[arg(long = "sat")]
    sat: Option<PathBuf>,

    /// Print a witness extension alongside `DC-*`/`DS-*` decisions.
    #[arg(short = 'w', long = "witness")]
    witness: bool,

    /// List supported input formats and exit.
    #[arg(long = "formats")]
    formats: bool,

    /// List supported problem tracks and exit.
    #[arg(long = "problems")]
    problems: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.formats {
        println!("i23");
        println!("tgf");
        return ExitCode::SUCCESS;
    }
    if cli.problems {
        for t in ALL_TRACKS {
            println!("{}", t);
        }
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            exit_code_for(&err)
        }
    }
}

fn exit_code_for(err: &DungError) -> ExitCode {
    match err {
        DungError::Input(_) => ExitCode::from(1),
        DungError::Config(_) => ExitCode::from(2),
        DungError::Sat(_) => ExitCode::from(3),
    }
}

fn run(cli: Cli) -> dungsolve::Result<()> {
    let problem = cli
        .problem
        .as_deref()
        .ok_or_else(|| dungsolve::ConfigError::MissingArgument("-p".to_string()))?;
    let track: Track = task::parse_track(problem)?;

    let format_str = cli.format.as_deref().unwrap_or("i23");
    let format: Format = task::parse_format(format_str)?;

    let af = {
        let reader: Box<dyn BufRead> = match cli.file.as_deref() {
            None => Box::new(BufReader::new(io::stdin())),
            Some(p) if p.as_os_str() == "-" => Box::new(BufReader::new(io::stdin())),
            Some(p) => Box::new(BufReader::new(
                File::open(p).map_err(dungsolve::InputError::Io)?,
            )),
        };
        parser::parse(reader, format)?
    };

    let query = match cli.argument.as_deref() {
        Some(name) => Some(
            af.id_of(name)
                .ok_or_else(|| dungsolve::ConfigError::NoSuchArgument(name.to_string()))?,
        ),
        None => None,
    };

    let opts = RunOptions {
        witness: cli.witness,
        backend: if cli.sat.is_some() { Backend::Process } else { Backend::Embedded },
        sat_path: cli.sat.clone(),
    };

    let answer = engine::run(&af, track, query, &opts)?;
    print_answer(&af, &answer);
    Ok(())
}

fn print_answer(af: &dungsolve::Af, answer: &Answer) {
    match answer {
        Answer::Yes(witness) => {
            println!("YES");
            print_witness(af, witness.as_deref());
        }
        Answer::No(witness) => {
            println!("NO");
            print_witness(af, witness.as_deref());
        }
        Answer::Extension(Some(ext)) => print_witness_line(af, ext),
        Answer::Extension(None) => println!("NO"),
        Answer::Count(n) => println!("{}", n),
    }
}

fn print_witness(af: &dungsolve::Af, witness: Option<&[usize]>) {
    if let Some(ext) = witness {
        print_witness_line(af, ext);
    }
}

fn print_witness_line(af: &dungsolve::Af, ext: &[usize]) {
    let names: Vec<&str> = ext.iter().map(|&i| af.name(i)).collect();
    println!("w {}", names.join(" "));
}
