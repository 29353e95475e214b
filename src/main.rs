use std::convert::TryFrom;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use log::{warn, LevelFilter};

use rust_cadd::diagnostics::{Diagnostics, LogDiagnostics, Silent};
use rust_cadd::types::{DebugMode, TrailingPolicy};
use rust_cadd::{Pipeline, PipelineConfig, ScoreRows};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "to-cadd";
    pub const DEFAULT_LOG_FILE: &str = "./to_cadd.log";
    // keep in line with rust_cadd::accumulator::DEFAULT_FLUSH_THRESHOLD
    pub const DEFAULT_FLUSH_EVERY: &str = "50000000";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Collapse per-allele CADD rows into one line per position with its three phred scores.")
        .arg(
            Arg::new("debug")
                .help("1 to log progress and timing to the log file, 0 to stay quiet.")
                .value_parser(value_parser!(u8))
                .default_value("0"),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Uncompressed CADD file to read instead of stdin."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("File to write instead of stdout."),
        )
        .arg(
            Arg::new("flush-every")
                .long("flush-every")
                .value_name("N")
                .value_parser(value_parser!(u64).range(1..))
                .default_value(consts::DEFAULT_FLUSH_EVERY)
                .help("Number of positions to buffer before writing."),
        )
        .arg(
            Arg::new("on-truncated")
                .long("on-truncated")
                .value_parser(["lenient", "strict"])
                .default_value("lenient")
                .help("Whether rows of an incomplete last position are dropped or fail the run."),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .default_value(consts::DEFAULT_LOG_FILE)
                .help("Where debug output goes."),
        )
}

fn init_logging(mode: DebugMode, log_file: &Path) -> Result<()> {
    match mode {
        DebugMode::On => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("could not open log file {}", log_file.display()))?;
            env_logger::Builder::new()
                .filter_level(LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        DebugMode::Off => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
    }
    Ok(())
}

fn config_from(matches: &ArgMatches) -> Result<PipelineConfig> {
    let flush_every = *matches
        .get_one::<u64>("flush-every")
        .expect("flush-every has a default");
    let trailing = matches
        .get_one::<String>("on-truncated")
        .expect("on-truncated has a default");
    Ok(PipelineConfig {
        flush_threshold: usize::try_from(flush_every)?,
        trailing: TrailingPolicy::from_str(trailing)?,
    })
}

fn run<D: Diagnostics>(matches: &ArgMatches, config: PipelineConfig, diagnostics: D) -> Result<()> {
    let rows = match matches.get_one::<PathBuf>("input") {
        Some(path) => ScoreRows::from_path(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => ScoreRows::from_stdin()?,
    };
    let sink: Box<dyn Write> = match matches.get_one::<PathBuf>("output") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("could not create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let summary = Pipeline::new(sink, config, diagnostics).run(rows)?;
    if summary.dropped_rows > 0 {
        warn!(
            "dropped {} trailing row(s) that did not complete a position",
            summary.dropped_rows
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = build_parser().get_matches();

    let debug = *matches.get_one::<u8>("debug").expect("debug has a default");
    let mode = DebugMode::try_from(debug).context("debug must be 0 or 1")?;
    let log_file = matches
        .get_one::<PathBuf>("log-file")
        .expect("log-file has a default");
    init_logging(mode, log_file)?;

    let config = config_from(&matches)?;
    match mode {
        DebugMode::On => run(&matches, config, LogDiagnostics::new()),
        DebugMode::Off => run(&matches, config, Silent),
    }
}
