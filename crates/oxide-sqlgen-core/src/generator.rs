//! Expression dispatcher.
//!
//! A [`Generator`] pairs a dialect with the dispatch logic: it consults the
//! dialect's support policy for the expression's kind, then calls the
//! matching rendering hook. Every call is independent and read-only, so one
//! generator can serve any number of threads.

use tracing::{debug, trace};

use crate::dialect::{Dialect, DialectKind, Support};
use crate::error::{Error, Result};
use crate::expression::Expression;

/// Translates expressions into SQL for one dialect.
pub struct Generator {
    dialect: Box<dyn Dialect>,
}

impl Generator {
    /// Creates a generator for the given dialect.
    #[must_use]
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self {
            dialect: Box::new(dialect),
        }
    }

    /// Creates a generator for a built-in dialect.
    #[must_use]
    pub fn for_kind(kind: DialectKind) -> Self {
        Self {
            dialect: kind.dialect(),
        }
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Generates the SQL for one expression.
    ///
    /// An empty string is a legitimate result: it means the dialect
    /// deliberately skips this kind of expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] when the dialect refuses the
    /// expression kind, or any error raised while rendering it.
    pub fn generate(&self, expression: &Expression) -> Result<String> {
        let kind = expression.kind();
        let dialect = self.dialect.as_ref();

        match dialect.support(kind) {
            Support::Native => {}
            Support::Ignored => {
                debug!(dialect = dialect.name(), operation = %kind, "operation skipped by dialect");
                return Ok(String::new());
            }
            Support::Unsupported => {
                return Err(Error::UnsupportedOperation {
                    dialect: dialect.name(),
                    operation: kind,
                });
            }
        }

        let sql = match expression {
            Expression::CreateSchema(e) => dialect.create_schema(e),
            Expression::DeleteSchema(e) => dialect.delete_schema(e),
            Expression::CreateTable(e) => dialect.create_table(e),
            Expression::RenameTable(e) => dialect.rename_table(e),
            Expression::DeleteTable(e) => dialect.delete_table(e),
            Expression::CreateColumn(e) => dialect.create_column(e),
            Expression::RenameColumn(e) => dialect.rename_column(e),
            Expression::DeleteColumn(e) => dialect.delete_column(e),
            Expression::CreateForeignKey(e) => dialect.create_foreign_key(e),
            Expression::DeleteForeignKey(e) => dialect.delete_foreign_key(e),
            Expression::CreateIndex(e) => dialect.create_index(e),
            Expression::DeleteIndex(e) => dialect.delete_index(e),
            Expression::InsertData(e) => dialect.insert_data(e),
        }?;

        trace!(dialect = dialect.name(), operation = %kind, %sql, "generated");
        Ok(sql)
    }

    /// Generates SQL for each expression in order, keeping empty statements.
    ///
    /// # Errors
    ///
    /// Stops at the first expression that fails.
    pub fn generate_all<'a, I>(&self, expressions: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'a Expression>,
    {
        expressions.into_iter().map(|e| self.generate(e)).collect()
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{PostgresDialect, SqliteDialect};
    use crate::expression::ExpressionKind;
    use crate::typemap::TypeMap;
    use crate::types::GenericType;

    /// A dialect that takes every default.
    struct Plain {
        types: TypeMap,
    }

    impl Plain {
        fn new() -> Self {
            Self {
                types: TypeMap::builder("plain")
                    .set(GenericType::Int32, "INT")
                    .build(),
            }
        }
    }

    impl Dialect for Plain {
        fn name(&self) -> &'static str {
            "plain"
        }

        fn type_map(&self) -> &TypeMap {
            &self.types
        }
    }

    #[test]
    fn test_base_leaves_dialect_specific_kinds_unsupported() {
        let generator = Generator::new(Plain::new());
        for expr in [
            Expression::create_schema("s"),
            Expression::delete_schema("s"),
            Expression::rename_column("t", "a", "b"),
            Expression::delete_foreign_key("fk", "t"),
            Expression::delete_index("ix", "t"),
        ] {
            assert_eq!(
                generator.generate(&expr),
                Err(Error::UnsupportedOperation {
                    dialect: "plain",
                    operation: expr.kind(),
                })
            );
        }
    }

    #[test]
    fn test_base_renders_portable_kinds() {
        let generator = Generator::new(Plain::new());
        assert_eq!(
            generator.generate(&Expression::delete_table("t")).unwrap(),
            "DROP TABLE t"
        );
    }

    #[test]
    fn test_ignored_is_empty_not_error() {
        let generator = Generator::new(SqliteDialect::new());
        assert_eq!(
            generator
                .generate(&Expression::delete_foreign_key("fk", "t"))
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_generate_all_keeps_order_and_empty_statements() {
        let generator = Generator::for_kind(DialectKind::Sqlite);
        let sql = generator
            .generate_all(&[
                Expression::delete_table("a"),
                Expression::delete_foreign_key("fk", "b"),
                Expression::delete_table("c"),
            ])
            .unwrap();
        assert_eq!(sql, ["DROP TABLE a", "", "DROP TABLE c"]);
    }

    #[test]
    fn test_generate_all_stops_at_first_failure() {
        let generator = Generator::for_kind(DialectKind::Sqlite);
        let err = generator
            .generate_all(&[Expression::delete_table("a"), Expression::create_schema("s")])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedOperation {
                operation: ExpressionKind::CreateSchema,
                ..
            }
        ));
    }

    #[test]
    fn test_generator_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Generator>();

        let generator = Generator::new(PostgresDialect::new());
        let expr = Expression::rename_table("a", "b");
        let expected = generator.generate(&expr).unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| assert_eq!(generator.generate(&expr).unwrap(), expected));
            }
        });
    }

    #[test]
    fn test_debug_shows_dialect_name() {
        let generator = Generator::for_kind(DialectKind::Postgres);
        assert_eq!(format!("{generator:?}"), "Generator { dialect: \"postgres\" }");
    }
}
