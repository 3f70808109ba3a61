//! JSON migration scripts.
//!
//! A script is an ordered list of expressions, optionally named:
//!
//! ```json
//! {
//!   "name": "0001_people",
//!   "expressions": [
//!     {"op": "delete_table", "name": "People"}
//!   ]
//! }
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use oxide_sqlgen_core::{Expression, Generator};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScriptError};

/// An ordered list of migration expressions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationScript {
    /// Optional script name, used in log output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expressions in execution order.
    pub expressions: Vec<Expression>,
}

impl MigrationScript {
    /// Creates a script from expressions.
    #[must_use]
    pub const fn new(expressions: Vec<Expression>) -> Self {
        Self {
            name: None,
            expressions,
        }
    }

    /// Loads a script from a file, or from stdin when `path` is `-`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] if the input cannot be read and
    /// [`ScriptError::Parse`] if it is not a valid script.
    pub fn load(path: &Path) -> Result<Self> {
        let io_error = |source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        };
        let text = if path == Path::new("-") {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(io_error)?;
            text
        } else {
            std::fs::read_to_string(path).map_err(io_error)?
        };
        Self::parse(&text, path)
    }

    /// Parses a script from JSON text. `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] if the text is not a valid script.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| ScriptError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Builds the down-migration: every expression inverted, last first.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::NotReversible`] for the first expression
    /// (in script order) that has no inverse.
    pub fn reversed(&self) -> Result<Self> {
        let mut expressions = self
            .expressions
            .iter()
            .enumerate()
            .map(|(index, expression)| {
                expression.reverse().ok_or(ScriptError::NotReversible {
                    index,
                    operation: expression.kind(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        expressions.reverse();
        Ok(Self {
            name: self.name.clone(),
            expressions,
        })
    }

    /// Renders the script as executable statements.
    ///
    /// Statements the dialect skips are dropped. Every remaining statement
    /// ends with `;`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Generate`] for the first expression that fails.
    pub fn render(&self, generator: &Generator) -> Result<Vec<String>> {
        let mut statements = Vec::with_capacity(self.expressions.len());
        for (index, expression) in self.expressions.iter().enumerate() {
            let mut sql = generator
                .generate(expression)
                .map_err(|source| ScriptError::Generate {
                    index,
                    operation: expression.kind(),
                    source,
                })?;
            if sql.is_empty() {
                debug!(index, operation = %expression.kind(), "dropping empty statement");
                continue;
            }
            if !sql.ends_with(';') {
                sql.push(';');
            }
            statements.push(sql);
        }
        Ok(statements)
    }
}
