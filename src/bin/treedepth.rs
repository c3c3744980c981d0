//! Entry point: parse CLI args, load a PACE graph, install signal
//! handlers, and hand off to the worker pool. The search is anytime and
//! interrupt-driven — `main` never returns under normal operation, since
//! `worker::run` loops until `SIGINT`/`SIGTERM` prints the best
//! decomposition found so far and terminates the process.

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use treedepth::cli::{self, USAGE};
use treedepth::io::pace::load_pace_graph;
use treedepth::signal;
use treedepth::worker;

fn main() -> ExitCode {
    let config = match cli::parse_args(env::args().skip(1)) {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("treedepth: {}", e);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    let graph = match &config.input_path {
        Some(path) => File::open(path).map_err(|e| e.to_string()).and_then(|f| load_pace_graph(BufReader::new(f)).map_err(|e| e.to_string())),
        None => load_pace_graph(io::stdin().lock()).map_err(|e| e.to_string()),
    };
    let graph = match graph {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("treedepth: {}", e);
            return ExitCode::FAILURE;
        }
    };

    signal::set_print_status_notice(config.status || config.verbose);
    signal::install_handlers();

    worker::run(&graph, config.seed, config.status, config.verbose);

    ExitCode::SUCCESS
}
