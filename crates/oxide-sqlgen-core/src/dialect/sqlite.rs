//! SQLite dialect.
//!
//! SQLite uses type affinity rather than sized types, so every generic type
//! maps to one of a handful of affinity names and requested sizes are
//! ignored. Foreign keys can only be declared at table creation, so adding or
//! dropping one later is skipped rather than rejected. SQLite has no schema
//! concept; schema expressions are refused.

use super::{Dialect, Support};
use crate::error::Result;
use crate::expression::ExpressionKind;
use crate::literal;
use crate::rewrite::Rewrite;
use crate::typemap::TypeMap;
use crate::types::GenericType;

/// `INTEGER PRIMARY KEY AUTOINCREMENT` is SQLite's identity column.
const REWRITES: &[Rewrite] = &[Rewrite::new(
    " IDENTITY PRIMARY KEY",
    " PRIMARY KEY AUTOINCREMENT",
)];

/// SQLite migration dialect.
#[derive(Debug, Clone)]
pub struct SqliteDialect {
    types: TypeMap,
}

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub fn new() -> Self {
        let types = TypeMap::builder("sqlite")
            .set(GenericType::Binary, "BLOB")
            .set(GenericType::Byte, "INTEGER")
            .set(GenericType::Int16, "INTEGER")
            .set(GenericType::Int32, "INTEGER")
            .set(GenericType::Int64, "INTEGER")
            .set(GenericType::Boolean, "INTEGER")
            .set(GenericType::Currency, "NUMERIC")
            .set(GenericType::Decimal, "NUMERIC")
            .set(GenericType::Double, "NUMERIC")
            .set(GenericType::Single, "NUMERIC")
            .set(GenericType::AnsiString, "TEXT")
            .set(GenericType::AnsiFixedString, "TEXT")
            .set(GenericType::String, "TEXT")
            .set(GenericType::FixedString, "TEXT")
            .set(GenericType::Date, "DATETIME")
            .set(GenericType::Time, "DATETIME")
            .set(GenericType::DateTime, "DATETIME")
            .set(GenericType::DateTimeOffset, "DATETIME")
            .set(GenericType::Guid, "UNIQUEIDENTIFIER")
            .build();
        Self { types }
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn type_map(&self) -> &TypeMap {
        &self.types
    }

    fn support(&self, kind: ExpressionKind) -> Support {
        match kind {
            ExpressionKind::CreateSchema | ExpressionKind::DeleteSchema => Support::Unsupported,
            ExpressionKind::CreateForeignKey | ExpressionKind::DeleteForeignKey => {
                Support::Ignored
            }
            // RENAME COLUMN needs SQLite 3.25.0.
            ExpressionKind::RenameColumn | ExpressionKind::DeleteIndex => Support::Native,
            other => other.default_support(),
        }
    }

    fn type_name(&self, ty: GenericType, _size: u32, _precision: u32) -> Result<String> {
        self.types.resolve(ty, 0, 0)
    }

    fn format_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(format!("X'{}'", literal::hex_upper(bytes)))
    }

    fn column_rewrites(&self) -> &'static [Rewrite] {
        REWRITES
    }

    fn idempotent_indexes(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ColumnDefinition;
    use crate::value::Value;

    fn dialect() -> SqliteDialect {
        SqliteDialect::new()
    }

    #[test]
    fn test_every_generic_type_is_mapped() {
        let d = dialect();
        for ty in GenericType::ALL {
            assert!(d.type_map().contains(ty), "{ty} is unmapped");
        }
    }

    #[test]
    fn test_sizes_are_ignored() {
        let d = dialect();
        assert_eq!(d.type_name(GenericType::String, 255, 0).unwrap(), "TEXT");
        assert_eq!(d.type_name(GenericType::Decimal, 19, 5).unwrap(), "NUMERIC");
    }

    #[test]
    fn test_identity_primary_key_becomes_autoincrement() {
        let col = ColumnDefinition::new("id", GenericType::Int64)
            .identity()
            .primary_key();
        let sql = dialect().render_column(&col).unwrap();
        assert_eq!(sql, "id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT");
        assert!(!sql.contains("IDENTITY PRIMARY KEY"));
    }

    #[test]
    fn test_identity_without_primary_key_is_left_alone() {
        let col = ColumnDefinition::new("seq", GenericType::Int64).identity();
        assert_eq!(
            dialect().render_column(&col).unwrap(),
            "seq INTEGER NOT NULL IDENTITY"
        );
    }

    #[test]
    fn test_literals() {
        let d = dialect();
        assert_eq!(d.format_literal(&Value::Bool(true)).unwrap(), "1");
        assert_eq!(d.format_literal(&Value::Bool(false)).unwrap(), "0");
        assert_eq!(
            d.format_literal(&Value::Bytes(vec![0xca, 0xfe])).unwrap(),
            "X'CAFE'"
        );
    }

    #[test]
    fn test_support_policy() {
        let d = dialect();
        assert_eq!(d.support(ExpressionKind::CreateSchema), Support::Unsupported);
        assert_eq!(d.support(ExpressionKind::DeleteForeignKey), Support::Ignored);
        assert_eq!(d.support(ExpressionKind::RenameColumn), Support::Native);
        assert_eq!(d.support(ExpressionKind::InsertData), Support::Native);
    }
}
