//! PostgreSQL dialect.

use std::borrow::Cow;

use super::{Dialect, Support};
use crate::error::Result;
use crate::expression::ExpressionKind;
use crate::literal;
use crate::typemap::TypeMap;
use crate::types::GenericType;

/// Largest length PostgreSQL accepts for `VARCHAR(n)` and `CHAR(n)`.
pub const MAX_CHARACTER_LENGTH: u32 = 10_485_760;

/// Largest precision PostgreSQL accepts for `DECIMAL(p, s)`. Wider decimals
/// fall back to the unbounded `DECIMAL(19,5)` entry.
pub const MAX_DECIMAL_PRECISION: u32 = 1000;

/// PostgreSQL migration dialect.
#[derive(Debug, Clone)]
pub struct PostgresDialect {
    types: TypeMap,
}

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub fn new() -> Self {
        let types = TypeMap::builder("postgres")
            .set(GenericType::Boolean, "BOOLEAN")
            .set(GenericType::Byte, "SMALLINT")
            .set(GenericType::Int16, "SMALLINT")
            .set(GenericType::Int32, "INTEGER")
            .set(GenericType::Int64, "BIGINT")
            .set(GenericType::Single, "REAL")
            .set(GenericType::Double, "DOUBLE PRECISION")
            .set(GenericType::Decimal, "DECIMAL(19,5)")
            .set_bounded(GenericType::Decimal, "DECIMAL($size,$precision)", MAX_DECIMAL_PRECISION)
            .set(GenericType::Currency, "MONEY")
            .set(GenericType::AnsiString, "TEXT")
            .set_bounded(GenericType::AnsiString, "VARCHAR($size)", MAX_CHARACTER_LENGTH)
            .set(GenericType::String, "TEXT")
            .set_bounded(GenericType::String, "VARCHAR($size)", MAX_CHARACTER_LENGTH)
            .set(GenericType::AnsiFixedString, "CHAR(255)")
            .set_bounded(GenericType::AnsiFixedString, "CHAR($size)", MAX_CHARACTER_LENGTH)
            .set(GenericType::FixedString, "CHAR(255)")
            .set_bounded(GenericType::FixedString, "CHAR($size)", MAX_CHARACTER_LENGTH)
            .set(GenericType::Date, "DATE")
            .set(GenericType::Time, "TIME")
            .set(GenericType::DateTime, "TIMESTAMP")
            .set(GenericType::DateTimeOffset, "TIMESTAMPTZ")
            .set(GenericType::Binary, "BYTEA")
            .set(GenericType::Guid, "UUID")
            .build();
        Self { types }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn type_map(&self) -> &TypeMap {
        &self.types
    }

    fn support(&self, _kind: ExpressionKind) -> Support {
        Support::Native
    }

    fn identity_keyword(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }

    fn format_bool(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    fn format_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(format!("'\\x{}'::bytea", literal::hex_lower(bytes)))
    }

    fn quote_identifier<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ColumnDefinition;
    use crate::value::Value;

    fn dialect() -> PostgresDialect {
        PostgresDialect::new()
    }

    #[test]
    fn test_every_generic_type_is_mapped() {
        let d = dialect();
        for ty in GenericType::ALL {
            assert!(d.type_name(ty, 0, 0).is_ok(), "{ty} is unmapped");
        }
    }

    #[test]
    fn test_sized_types() {
        let d = dialect();
        assert_eq!(d.type_name(GenericType::String, 0, 0).unwrap(), "TEXT");
        assert_eq!(d.type_name(GenericType::String, 100, 0).unwrap(), "VARCHAR(100)");
        assert_eq!(
            d.type_name(GenericType::String, MAX_CHARACTER_LENGTH + 1, 0).unwrap(),
            "TEXT"
        );
        assert_eq!(d.type_name(GenericType::FixedString, 2, 0).unwrap(), "CHAR(2)");
        assert_eq!(d.type_name(GenericType::Decimal, 10, 2).unwrap(), "DECIMAL(10,2)");
        assert_eq!(d.type_name(GenericType::Decimal, 0, 0).unwrap(), "DECIMAL(19,5)");
        assert_eq!(
            d.type_name(GenericType::Decimal, MAX_DECIMAL_PRECISION, 2).unwrap(),
            "DECIMAL(1000,2)"
        );
        assert_eq!(
            d.type_name(GenericType::Decimal, MAX_DECIMAL_PRECISION + 1, 2).unwrap(),
            "DECIMAL(19,5)"
        );
    }

    #[test]
    fn test_identity_column() {
        let col = ColumnDefinition::new("id", GenericType::Int64)
            .identity()
            .primary_key();
        assert_eq!(
            dialect().render_column(&col).unwrap(),
            r#""id" INTEGER NOT NULL GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY"#
        );
    }

    #[test]
    fn test_quote_identifier_doubles_quotes() {
        assert_eq!(dialect().quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_literals() {
        let d = dialect();
        assert_eq!(d.format_literal(&Value::Bool(true)).unwrap(), "TRUE");
        assert_eq!(
            d.format_literal(&Value::Bytes(vec![0xca, 0xfe])).unwrap(),
            "'\\xcafe'::bytea"
        );
    }
}
