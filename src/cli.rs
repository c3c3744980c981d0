//! Manual command-line argument parsing (component K), in the same style
//! as the host engine's `cooperative/src/util/cli_args.rs`: a small
//! `CliErr` wrapping a `&'static str` plus a couple of free parsing
//! helpers walked over `std::env::args()`.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct CliErr(pub &'static str);

impl fmt::Display for CliErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for CliErr {}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: Option<String>,
    pub seed: u64,
    pub status: bool,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: None,
            seed: 0,
            status: false,
            verbose: false,
        }
    }
}

pub const USAGE: &str = "\
usage: treedepth [options] [-i <file>]

Reads a graph in the PACE 2020 text format (from <file>, or stdin if -i is
omitted) and writes a tree-depth decomposition to stdout on SIGINT/SIGTERM.

options:
  -i, --input <file>   read the graph from <file> instead of stdin
  -s, --seed <n>        seed the search's random number generator (default 0)
      --status          print one status line per improving decomposition
      --verbose         print one status line per search attempt
  -h, --help            print this message and exit";

/// Parse `args` (excluding the program name). Returns `Ok(None)` if
/// `-h`/`--help` was requested, in which case the caller should print
/// [`USAGE`] and exit without doing further work.
pub fn parse_args(args: impl Iterator<Item = String>) -> Result<Option<Config>, CliErr> {
    let mut config = Config::default();
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-i" | "--input" => {
                config.input_path = Some(parse_required(&mut args, "input path")?);
            }
            "-s" | "--seed" => {
                config.seed = parse_required(&mut args, "seed")?;
            }
            "--status" => config.status = true,
            "--verbose" => config.verbose = true,
            _ => return Err(CliErr("unrecognized argument")),
        }
    }

    Ok(Some(config))
}

fn parse_required<T: std::str::FromStr>(args: &mut impl Iterator<Item = String>, _field_name: &'static str) -> Result<T, CliErr> {
    let next = args.next().ok_or(CliErr("missing value for argument"))?;
    next.parse().map_err(|_| CliErr("invalid value for argument"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> impl Iterator<Item = String> {
        items.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn help_flag_short_circuits() {
        assert!(parse_args(args(&["--help"])).unwrap().is_none());
        assert!(parse_args(args(&["-h"])).unwrap().is_none());
    }

    #[test]
    fn defaults_with_no_flags() {
        let config = parse_args(args(&[])).unwrap().unwrap();
        assert_eq!(config.seed, 0);
        assert!(!config.status);
        assert!(!config.verbose);
        assert!(config.input_path.is_none());
    }

    #[test]
    fn parses_input_seed_and_flags() {
        let config = parse_args(args(&["-i", "graph.gr", "-s", "42", "--status", "--verbose"]))
            .unwrap()
            .unwrap();
        assert_eq!(config.input_path.as_deref(), Some("graph.gr"));
        assert_eq!(config.seed, 42);
        assert!(config.status);
        assert!(config.verbose);
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(parse_args(args(&["--bogus"])).is_err());
    }

    #[test]
    fn rejects_missing_value() {
        assert!(parse_args(args(&["-s"])).is_err());
    }
}
