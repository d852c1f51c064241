//! Runtime settings derived from the command line.

use clap::ValueEnum;
use std::path::PathBuf;

use crate::cmd::sale::Args;

/// Decimal places shown for money amounts unless `--precision` says otherwise.
pub const DEFAULT_PRECISION: u32 = 3;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

/// Settings shared by the one-shot commands and the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Lot file to load; the built-in sample holdings when absent.
    pub lots: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Decimal places for money amounts in text output.
    pub precision: u32,
    /// Where the interactive prompt keeps its line history.
    pub history: Option<PathBuf>,
}

impl Settings {
    /// Collect the settings carried by parsed arguments.
    pub fn from_args(args: &Args) -> Self {
        Self {
            lots: args.lots.clone(),
            format: args.format,
            precision: args.precision,
            history: history_path(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lots: None,
            format: OutputFormat::Text,
            precision: DEFAULT_PRECISION,
            history: None,
        }
    }
}

/// Get the history file path
pub fn history_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("costbasis").join("history"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["costbasis", "remaining", "--quantity", "10"]);
        let settings = Settings::from_args(&args);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.precision, DEFAULT_PRECISION);
    }

    #[test]
    fn test_from_args() {
        let args = Args::parse_from([
            "costbasis",
            "--lots",
            "holdings.csv",
            "--format",
            "json",
            "--precision",
            "5",
            "lots",
        ]);
        let settings = Settings::from_args(&args);
        assert_eq!(settings.lots, Some(PathBuf::from("holdings.csv")));
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.precision, 5);
    }

    #[test]
    fn test_history_path_is_namespaced() {
        if let Some(path) = history_path() {
            assert!(path.ends_with("costbasis/history"));
        }
    }
}
