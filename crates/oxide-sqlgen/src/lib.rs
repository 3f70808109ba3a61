//! Command-line front end for `oxide-sqlgen-core`.
//!
//! `oxide-sqlgen` reads a JSON migration script (a list of expressions),
//! renders it for one dialect and prints the SQL, one statement per line.
//!
//! # CLI Usage
//!
//! ```bash
//! # Render for SQLite (the default)
//! oxide-sqlgen migrations/0001_people.json
//!
//! # Render the down-migration for PostgreSQL into a file
//! oxide-sqlgen -d postgres --reverse -o down.sql migrations/0001_people.json
//!
//! # Read the script from stdin
//! cat 0001_people.json | oxide-sqlgen -
//! ```

pub mod config;
pub mod error;
pub mod script;

use std::io::Write;

use oxide_sqlgen_core::Generator;
use tracing::info;

pub use config::Cli;
pub use error::{Result, ScriptError};
pub use script::MigrationScript;

/// Loads, renders and writes the script selected by `cli`.
///
/// # Errors
///
/// Returns any [`ScriptError`] raised while loading, reversing, rendering
/// or writing.
pub fn run(cli: &Cli) -> Result<()> {
    let mut script = MigrationScript::load(&cli.script)?;
    if cli.reverse {
        script = script.reversed()?;
    }

    let generator = Generator::for_kind(cli.dialect);
    let statements = script.render(&generator)?;
    info!(
        script = script.name.as_deref().unwrap_or("-"),
        dialect = %cli.dialect,
        reverse = cli.reverse,
        statements = statements.len(),
        "rendered migration script"
    );

    let mut sql = statements.join("\n");
    if !sql.is_empty() {
        sql.push('\n');
    }

    match &cli.output {
        Some(path) => std::fs::write(path, sql).map_err(|source| ScriptError::Io {
            path: path.clone(),
            source,
        }),
        None => std::io::stdout()
            .lock()
            .write_all(sql.as_bytes())
            .map_err(|source| ScriptError::Io {
                path: "-".into(),
                source,
            }),
    }
}
