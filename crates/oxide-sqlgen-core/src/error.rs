//! Error types for SQL generation.

use crate::expression::ExpressionKind;
use crate::types::GenericType;

/// Errors raised while generating SQL for an expression.
///
/// Generation is deterministic, so none of these are worth retrying with the
/// same input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The dialect's type map has no usable entry for a generic type.
    #[error("Type '{generic_type}' (size {size}) has no mapping in the {dialect} dialect")]
    UnmappedType {
        /// Dialect name.
        dialect: &'static str,
        /// The generic type being resolved.
        generic_type: GenericType,
        /// The requested size, after the dialect's size policy.
        size: u32,
    },

    /// A value has no literal representation in the dialect.
    #[error("Cannot format a {kind} value as a SQL literal")]
    UnsupportedLiteral {
        /// Kind of the offending value.
        kind: &'static str,
    },

    /// The dialect has no translation for an expression kind.
    #[error("The {dialect} dialect does not support {operation}")]
    UnsupportedOperation {
        /// Dialect name.
        dialect: &'static str,
        /// The rejected expression kind.
        operation: ExpressionKind,
    },

    /// A structurally required field is missing or malformed.
    #[error("Invalid definition '{name}': {field} {reason}")]
    InvalidDefinition {
        /// Name of the offending column, table, index or constraint.
        name: String,
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(name: &str, field: &'static str, reason: &'static str) -> Self {
        Self::InvalidDefinition {
            name: name.to_string(),
            field,
            reason,
        }
    }
}

/// Result type for SQL generation.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = Error::UnmappedType {
            dialect: "sqlite",
            generic_type: GenericType::Guid,
            size: 0,
        };
        assert_eq!(
            err.to_string(),
            "Type 'guid' (size 0) has no mapping in the sqlite dialect"
        );

        let err = Error::UnsupportedOperation {
            dialect: "sqlite",
            operation: ExpressionKind::CreateSchema,
        };
        assert_eq!(
            err.to_string(),
            "The sqlite dialect does not support create_schema"
        );

        let err = Error::invalid("IX_empty", "columns", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid definition 'IX_empty': columns must not be empty"
        );
    }
}
