//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing. The CLI is
//! thin glue: it parses, hands everything to the engine, and routes results
//! to the output layer.

use clap::{Parser, ValueEnum};

/// A TCP connectivity probe.
#[derive(Parser, Debug)]
#[command(name = "portprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe TCP ports: reachability, banners, and server versions", long_about = None)]
pub struct Args {
    /// Target hosts: IP addresses or DNS names, comma lists accepted
    #[arg(value_name = "TARGET", required = true, num_args = 1..)]
    pub targets: Vec<String>,

    /// Ports to probe: "80", "1-1000", or "21,22,80"
    #[arg(short, long, default_value = "1-1000")]
    pub ports: String,

    /// Connect timeout in seconds, fractions accepted
    #[arg(short = 't', long, default_value = "2.0", value_name = "SECS")]
    pub timeout: f64,

    /// Maximum number of concurrent connection attempts
    #[arg(short = 'c', long, default_value = "32")]
    pub concurrency: usize,

    /// Read the service banner from the probed port instead of scanning
    #[arg(short = 'b', long, conflicts_with = "server_version")]
    pub banner: bool,

    /// Fetch the web server version from the Server header (port 80)
    #[arg(long)]
    pub server_version: bool,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Show scanning progress and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Targets with comma lists split out, input order kept.
    pub fn target_list(&self) -> Vec<String> {
        self.targets
            .iter()
            .flat_map(|t| t.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["portprobe", "10.0.0.1"]);
        assert_eq!(args.ports, "1-1000");
        assert_eq!(args.timeout, 2.0);
        assert_eq!(args.output, OutputFormat::Plain);
        assert!(!args.banner);
    }

    #[test]
    fn test_comma_targets_split_in_order() {
        let args = Args::parse_from(["portprobe", "10.0.0.1,web.internal", "10.0.0.2"]);
        assert_eq!(
            args.target_list(),
            vec!["10.0.0.1", "web.internal", "10.0.0.2"]
        );
    }

    #[test]
    fn test_banner_conflicts_with_server_version() {
        let parsed = Args::try_parse_from(["portprobe", "10.0.0.1", "-b", "--server-version"]);
        assert!(parsed.is_err());
    }
}
