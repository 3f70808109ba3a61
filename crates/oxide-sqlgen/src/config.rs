//! Command-line configuration.

use std::path::{Path, PathBuf};

use clap::Parser;
use oxide_sqlgen_core::DialectKind;
use tracing::Level;

/// Render a JSON migration script as SQL for one database dialect.
#[derive(Debug, Parser)]
#[command(name = "oxide-sqlgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target dialect (sqlite, postgres).
    #[arg(short, long, env = "OXIDE_SQLGEN_DIALECT", default_value_t = DialectKind::Sqlite)]
    pub dialect: DialectKind,

    /// Emit the down-migration: inverse expressions in reverse order.
    #[arg(short, long)]
    pub reverse: bool,

    /// Write SQL to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Migration script to render (`-` reads stdin).
    pub script: PathBuf,
}

impl Cli {
    /// The tracing level selected by `--verbose`.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Whether the script is read from stdin.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.script == Path::new("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["oxide-sqlgen", "up.json"]).unwrap();
        assert_eq!(cli.dialect, DialectKind::Sqlite);
        assert!(!cli.reverse);
        assert!(cli.output.is_none());
        assert_eq!(cli.log_level(), Level::INFO);
        assert_eq!(cli.script, PathBuf::from("up.json"));
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "oxide-sqlgen",
            "-d",
            "postgresql",
            "--reverse",
            "-o",
            "down.sql",
            "-v",
            "-",
        ])
        .unwrap();
        assert_eq!(cli.dialect, DialectKind::Postgres);
        assert!(cli.reverse);
        assert_eq!(cli.output, Some(PathBuf::from("down.sql")));
        assert_eq!(cli.log_level(), Level::DEBUG);
        assert!(cli.reads_stdin());
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        let err = Cli::try_parse_from(["oxide-sqlgen", "-d", "oracle", "up.json"]).unwrap_err();
        assert!(err.to_string().contains("Unknown dialect 'oracle'"));
    }

    #[test]
    fn test_script_is_required() {
        assert!(Cli::try_parse_from(["oxide-sqlgen"]).is_err());
    }
}
