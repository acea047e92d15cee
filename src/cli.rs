//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Check whether file-hosting share links are still alive.
///
/// Linkprobe validates MEGA and Google Drive links and asks each provider
/// whether the linked file or folder still exists. Links are read from the
/// command line or, when none are given, one per line from stdin.
#[derive(Parser, Debug)]
#[command(name = "linkprobe")]
#[command(author, version, about)]
pub struct Args {
    /// Links to check (reads stdin when omitted)
    pub links: Vec<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Log every HTTP exchange
    #[arg(long)]
    pub verbose_http: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["linkprobe"]).unwrap();
        assert!(args.links.is_empty());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(!args.insecure);
        assert!(!args.verbose_http);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_cli_positional_links_collected_in_order() {
        let args = Args::try_parse_from([
            "linkprobe",
            "https://mega.nz/file/xxxxxxxx#",
            "https://mega.nz/#!xxxxxxxx!",
        ])
        .unwrap();
        assert_eq!(
            args.links,
            vec!["https://mega.nz/file/xxxxxxxx#", "https://mega.nz/#!xxxxxxxx!"]
        );
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["linkprobe", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["linkprobe", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["linkprobe", "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_output_and_transport_flags() {
        let args = Args::try_parse_from([
            "linkprobe",
            "--json",
            "--insecure",
            "--verbose-http",
            "--config",
            "/tmp/linkprobe.toml",
        ])
        .unwrap();
        assert!(args.json);
        assert!(args.insecure);
        assert!(args.verbose_http);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/linkprobe.toml")));
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["linkprobe", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Args::try_parse_from(["linkprobe", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["linkprobe", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_config_requires_value() {
        let err = Args::try_parse_from(["linkprobe", "--config"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
