use std::io::Read;

use owo_colors::OwoColorize;
use walkcount::prelude::*;

use tracing::{debug, error, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn input_arg() -> Arg {
    Arg::new("input")
        .help("file containing candidates and rules, `-` reads from stdin")
        .default_value("-")
}

fn cli() -> clap::Command {
    Command::new("walkcount")
    .about("Counts the words of bounded length that extend a list of candidates")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("count")
        .about("reduces the candidates to generators and counts their extensions")
        .arg(input_arg())
        .arg(
            Arg::new("low")
            .long("low")
            .value_parser(value_parser!(usize))
            .default_value("7")
        )
        .arg(
            Arg::new("high")
            .long("high")
            .value_parser(value_parser!(usize))
            .default_value("11")
        )
        .arg(
            Arg::new("strategy")
            .long("strategy")
            .value_parser(["cumulative", "propagation", "auto"])
            .default_value("auto")
        )
    )
    .subcommand(
        Command::new("first")
        .about("prints the first candidate that the rules allow")
        .arg(input_arg())
    )
    .subcommand(
        Command::new("positions")
        .about("sums the positions of all candidates that the rules allow")
        .arg(input_arg())
    )
    .subcommand(
        Command::new("table")
        .about("prints the transition table of the rules")
        .arg(input_arg())
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_puzzle(matches: &ArgMatches) -> Result<Puzzle> {
    let path = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");

    let text = if path == "-" {
        debug!("reading puzzle from stdin");
        let mut text = String::new();
        std::io::stdin().lock().read_to_string(&mut text)?;
        text
    } else {
        debug!("reading puzzle from {path}");
        std::fs::read_to_string(path)?
    };

    Puzzle::parse(&text)
}

fn config_from(matches: &ArgMatches) -> Config {
    let mut config = Config::default();
    if let Some(&low) = matches.get_one::<usize>("low") {
        config = config.with_low(low);
    }
    if let Some(&high) = matches.get_one::<usize>("high") {
        config = config.with_high(high);
    }
    if let Some(strategy) = matches
        .get_one::<String>("strategy")
        .and_then(|s| s.parse::<Strategy>().ok())
    {
        config = config.with_strategy(strategy);
    }
    config
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("count", sub_matches)) => {
            let puzzle = read_puzzle(sub_matches)?;
            let config = config_from(sub_matches);
            let set = PrefixFreeSet::reduce(&puzzle.graph, &puzzle.candidates);
            let report = count_walks(&puzzle.graph, &set, &config);

            println!("{}", report.tally_table());
            println!("Total: {}", report.total().bold().green());
            println!("Bits: {}", report.bits());
            println!(
                "Runtime: {}µs ({})",
                report.elapsed().as_micros(),
                report.strategy()
            );
        }
        Some(("first", sub_matches)) => {
            let puzzle = read_puzzle(sub_matches)?;
            match first_valid(&puzzle.graph, &puzzle.candidates) {
                Some(word) => println!("{word}"),
                None => println!("no candidate is allowed"),
            }
        }
        Some(("positions", sub_matches)) => {
            let puzzle = read_puzzle(sub_matches)?;
            println!("{}", valid_position_sum(&puzzle.graph, &puzzle.candidates));
        }
        Some(("table", sub_matches)) => {
            let puzzle = read_puzzle(sub_matches)?;
            println!("{}", puzzle.graph.transition_table());
        }
        _ => unreachable!(),
    }
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if let Err(e) = run(&matches) {
        error!("{e}");
        eprintln!("{}", e.red());
        std::process::exit(1);
    }
}
