//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use catalog_core::{DEFAULT_TOR_PROXY, InputSource, OutputSink};
use clap::Parser;

/// Probe a CSV list of instances and write a JSON catalog.
///
/// Each row is `url,country,cloudflare[,description]`. Every instance is
/// fetched live (onion instances through Tor) and its version scraped from
/// the response. Exit status: 0 success, 1 some instances failed or the
/// output could not be written, 2 malformed input or bad configuration.
#[derive(Parser, Debug)]
#[command(name = "instance-catalog")]
#[command(author, version, about)]
pub struct Args {
    /// Import onion instances from an existing catalog JSON instead of probing them
    #[arg(short = 'i', long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Do not probe onion instances
    #[arg(short = 'T', long)]
    pub no_tor: bool,

    /// Stop at the first instance that fails (no output is written)
    #[arg(short = 'f', long)]
    pub fail_fast: bool,

    /// Instance list to read ('-' for stdin)
    #[arg(short = 'I', long, value_name = "FILE", default_value = "-")]
    pub input: InputSource,

    /// Where to write the catalog ('-' for stdout)
    #[arg(short = 'o', long, value_name = "FILE", default_value = "-")]
    pub output: OutputSink,

    /// Tor SOCKS proxy used for onion instances
    #[arg(long, value_name = "URL", default_value = DEFAULT_TOR_PROXY)]
    pub tor_proxy: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["instance-catalog"]).unwrap();
        assert_eq!(args.input, InputSource::Stdin);
        assert_eq!(args.output, OutputSink::Stdout);
        assert!(args.import.is_none());
        assert!(!args.no_tor);
        assert!(!args.fail_fast);
        assert_eq!(args.tor_proxy, DEFAULT_TOR_PROXY);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_cli_short_flags() {
        let args = Args::try_parse_from([
            "instance-catalog",
            "-i",
            "old.json",
            "-T",
            "-f",
            "-I",
            "instances.csv",
            "-o",
            "instances.json",
        ])
        .unwrap();
        assert_eq!(args.import, Some(PathBuf::from("old.json")));
        assert!(args.no_tor);
        assert!(args.fail_fast);
        assert_eq!(args.input, InputSource::File(PathBuf::from("instances.csv")));
        assert_eq!(args.output, OutputSink::File(PathBuf::from("instances.json")));
    }

    #[test]
    fn test_cli_long_flags() {
        let args = Args::try_parse_from([
            "instance-catalog",
            "--import",
            "old.json",
            "--no-tor",
            "--fail-fast",
            "--input",
            "-",
            "--output",
            "-",
            "--tor-proxy",
            "socks5h://10.0.0.1:9150",
        ])
        .unwrap();
        assert!(args.no_tor && args.fail_fast);
        assert_eq!(args.input, InputSource::Stdin);
        assert_eq!(args.tor_proxy, "socks5h://10.0.0.1:9150");
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["instance-catalog", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["instance-catalog", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["instance-catalog", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
