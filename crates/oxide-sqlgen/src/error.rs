//! Error types for the script runner.

use std::path::PathBuf;

use oxide_sqlgen_core::ExpressionKind;

/// Errors that can occur while loading or rendering a migration script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script or output file could not be read or written.
    #[error("IO error on '{path}': {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The script is not a valid JSON migration script.
    #[error("Failed to parse migration script '{path}': {source}")]
    Parse {
        /// The script path (`-` for stdin).
        path: PathBuf,
        /// The JSON error, with line and column.
        source: serde_json::Error,
    },

    /// An expression could not be turned into SQL.
    #[error("Expression #{index} ({operation}) failed: {source}")]
    Generate {
        /// Position of the expression in the script.
        index: usize,
        /// The expression kind.
        operation: ExpressionKind,
        /// The generator error.
        source: oxide_sqlgen_core::Error,
    },

    /// The script contains an expression with no inverse.
    #[error("Expression #{index} ({operation}) is not reversible")]
    NotReversible {
        /// Position of the expression in the script.
        index: usize,
        /// The expression kind.
        operation: ExpressionKind,
    },
}

/// Result type for script operations.
pub type Result<T> = std::result::Result<T, ScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_error_names_expression() {
        let err = ScriptError::Generate {
            index: 2,
            operation: ExpressionKind::CreateSchema,
            source: oxide_sqlgen_core::Error::UnsupportedOperation {
                dialect: "sqlite",
                operation: ExpressionKind::CreateSchema,
            },
        };
        assert_eq!(
            err.to_string(),
            "Expression #2 (create_schema) failed: The sqlite dialect does not support create_schema"
        );
    }

    #[test]
    fn test_not_reversible_message() {
        let err = ScriptError::NotReversible {
            index: 0,
            operation: ExpressionKind::DeleteTable,
        };
        assert_eq!(err.to_string(), "Expression #0 (delete_table) is not reversible");
    }
}
