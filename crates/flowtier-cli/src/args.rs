//! Command-line argument definitions for the Flowtier CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// What the CLI writes to the output file.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// A standalone SVG document.
    #[default]
    Svg,
    /// The laid-out diagram as JSON, for renderers outside Rust.
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

/// Command-line arguments for the Flowtier flow diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input flow file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file [default: out.svg or out.json]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The output path, defaulting to `out.<ext>` for the chosen format.
    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("out.{}", self.format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["flowtier", "order.flow"]).unwrap();

        assert_eq!(args.input, "order.flow");
        assert_eq!(args.format, OutputFormat::Svg);
        assert_eq!(args.output_path(), "out.svg");
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }

    #[test]
    fn test_json_format_changes_default_output() {
        let args = Args::try_parse_from(["flowtier", "order.flow", "-f", "json"]).unwrap();
        assert_eq!(args.output_path(), "out.json");

        let args =
            Args::try_parse_from(["flowtier", "order.flow", "-f", "json", "-o", "layout.txt"])
                .unwrap();
        assert_eq!(args.output_path(), "layout.txt");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["flowtier", "order.flow", "-f", "png"]).is_err());
    }
}
