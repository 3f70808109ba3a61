//! Database dialects.
//!
//! A [`Dialect`] supplies everything engine-specific: its type map, literal
//! spellings, identifier quoting, and one rendering hook per expression kind.
//! Hooks have standard-SQL defaults, so a dialect only overrides its quirks.
//!
//! Whether a kind is rendered at all is decided separately by
//! [`Dialect::support`], so "emit nothing" and "refuse" are explicit,
//! per-kind choices rather than something a hook does on its own.

mod postgres;
mod sqlite;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::definition::{ColumnDefinition, IndexDefinition};
use crate::error::{Error, Result};
use crate::expression::{
    CreateColumn, CreateForeignKey, CreateIndex, CreateSchema, CreateTable, DeleteColumn,
    DeleteForeignKey, DeleteIndex, DeleteSchema, DeleteTable, ExpressionKind, InsertData,
    RenameColumn, RenameTable,
};
use crate::literal;
use crate::render;
use crate::rewrite::Rewrite;
use crate::typemap::TypeMap;
use crate::types::GenericType;
use crate::value::Value;

/// How a dialect handles an expression kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Support {
    /// Rendered by the dialect's hook.
    Native,
    /// Deliberately emitted as an empty statement.
    Ignored,
    /// Rejected with [`Error::UnsupportedOperation`].
    Unsupported,
}

impl ExpressionKind {
    /// The support level a dialect gets unless it says otherwise.
    ///
    /// Kinds without a portable translation start out unsupported; a dialect
    /// opts in by overriding [`Dialect::support`].
    #[must_use]
    pub const fn default_support(self) -> Support {
        match self {
            Self::CreateSchema
            | Self::DeleteSchema
            | Self::RenameColumn
            | Self::CreateForeignKey
            | Self::DeleteForeignKey
            | Self::DeleteIndex => Support::Unsupported,
            Self::CreateTable
            | Self::RenameTable
            | Self::DeleteTable
            | Self::CreateColumn
            | Self::DeleteColumn
            | Self::CreateIndex
            | Self::InsertData => Support::Native,
        }
    }
}

/// Dialect-specific SQL generation for migration expressions.
///
/// Implementations must be fully configured on construction; the generator
/// only ever reads from them.
pub trait Dialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the dialect's type map.
    fn type_map(&self) -> &TypeMap;

    /// Returns how this dialect handles an expression kind.
    fn support(&self, kind: ExpressionKind) -> Support {
        kind.default_support()
    }

    // ---- types -----------------------------------------------------------

    /// Resolves a generic type through the type map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmappedType`] when the map has no usable entry.
    fn type_name(&self, ty: GenericType, size: u32, precision: u32) -> Result<String> {
        self.type_map().resolve(ty, size, precision)
    }

    /// The type identity columns are stored as.
    fn identity_type(&self) -> GenericType {
        GenericType::Int32
    }

    /// The keyword that marks an identity column.
    fn identity_keyword(&self) -> &'static str {
        "IDENTITY"
    }

    // ---- literals and names ----------------------------------------------

    /// Spells a boolean literal.
    fn format_bool(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    /// Spells a byte-block literal.
    ///
    /// # Errors
    ///
    /// The default rejects bytes with [`Error::UnsupportedLiteral`].
    fn format_bytes(&self, _bytes: &[u8]) -> Result<String> {
        Err(Error::UnsupportedLiteral { kind: "bytes" })
    }

    /// Formats any value as a literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLiteral`] for values with no literal form.
    fn format_literal(&self, value: &Value) -> Result<String> {
        literal::format_literal(self, value)
    }

    /// Applies the dialect's identifier escaping. The default leaves names
    /// untouched.
    fn quote_identifier<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }

    // ---- fragments -------------------------------------------------------

    /// Renders the SQL type of a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmappedType`] when the type cannot be resolved.
    fn column_type(&self, column: &ColumnDefinition) -> Result<String> {
        render::column_type(self, column)
    }

    /// Rewrite rules applied to every rendered column definition.
    fn column_rewrites(&self) -> &'static [Rewrite] {
        &[]
    }

    /// Renders one column definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`], [`Error::UnmappedType`] or
    /// [`Error::UnsupportedLiteral`].
    fn render_column(&self, column: &ColumnDefinition) -> Result<String> {
        render::column(self, column)
    }

    /// Whether CREATE INDEX / DROP INDEX carry IF [NOT] EXISTS.
    fn idempotent_indexes(&self) -> bool {
        false
    }

    /// Renders a CREATE INDEX statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] for an index without columns.
    fn render_index(&self, index: &IndexDefinition) -> Result<String> {
        render::index(self, index)
    }

    // ---- statements ------------------------------------------------------

    /// Generates SQL for CREATE SCHEMA.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn create_schema(&self, expr: &CreateSchema) -> Result<String> {
        Ok(format!("CREATE SCHEMA {}", self.quote_identifier(&expr.name)))
    }

    /// Generates SQL for DROP SCHEMA.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn delete_schema(&self, expr: &DeleteSchema) -> Result<String> {
        Ok(format!("DROP SCHEMA {}", self.quote_identifier(&expr.name)))
    }

    /// Generates SQL for CREATE TABLE.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] for a table without columns and
    /// propagates column rendering errors.
    fn create_table(&self, expr: &CreateTable) -> Result<String> {
        if expr.columns.is_empty() {
            return Err(Error::invalid(&expr.name, "columns", "must not be empty"));
        }
        let columns = expr
            .columns
            .iter()
            .map(|c| self.render_column(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "CREATE TABLE {} ({})",
            self.quote_identifier(&expr.name),
            columns.join(", ")
        ))
    }

    /// Generates SQL for renaming a table.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn rename_table(&self, expr: &RenameTable) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quote_identifier(&expr.old_name),
            self.quote_identifier(&expr.new_name)
        ))
    }

    /// Generates SQL for DROP TABLE.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn delete_table(&self, expr: &DeleteTable) -> Result<String> {
        Ok(format!("DROP TABLE {}", self.quote_identifier(&expr.name)))
    }

    /// Generates SQL for ADD COLUMN.
    ///
    /// # Errors
    ///
    /// Propagates column rendering errors.
    fn create_column(&self, expr: &CreateColumn) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.quote_identifier(&expr.table),
            self.render_column(&expr.column)?
        ))
    }

    /// Generates SQL for RENAME COLUMN.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn rename_column(&self, expr: &RenameColumn) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            self.quote_identifier(&expr.table),
            self.quote_identifier(&expr.old_name),
            self.quote_identifier(&expr.new_name)
        ))
    }

    /// Generates SQL for DROP COLUMN.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn delete_column(&self, expr: &DeleteColumn) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote_identifier(&expr.table),
            self.quote_identifier(&expr.column)
        ))
    }

    /// Generates SQL for ADD CONSTRAINT ... FOREIGN KEY.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] when the column lists are empty
    /// or do not pair up.
    fn create_foreign_key(&self, expr: &CreateForeignKey) -> Result<String> {
        let fk = &expr.foreign_key;
        fk.validate()?;

        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.quote_identifier(&fk.table),
            self.quote_identifier(&fk.name),
            render::name_list(self, fk.columns.iter().map(String::as_str)),
            self.quote_identifier(&fk.referenced_table),
            render::name_list(self, fk.referenced_columns.iter().map(String::as_str)),
        );
        if let Some(action) = fk.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = fk.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        Ok(sql)
    }

    /// Generates SQL for DROP CONSTRAINT.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn delete_foreign_key(&self, expr: &DeleteForeignKey) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.quote_identifier(&expr.table),
            self.quote_identifier(&expr.name)
        ))
    }

    /// Generates SQL for CREATE INDEX.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] for an index without columns.
    fn create_index(&self, expr: &CreateIndex) -> Result<String> {
        self.render_index(&expr.index)
    }

    /// Generates SQL for DROP INDEX.
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn delete_index(&self, expr: &DeleteIndex) -> Result<String> {
        let mut sql = String::from("DROP INDEX ");
        if self.idempotent_indexes() {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.quote_identifier(&expr.name));
        Ok(sql)
    }

    /// Generates one `INSERT ... ;` statement per row, concatenated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] for a row without columns and
    /// propagates literal errors.
    fn insert_data(&self, expr: &InsertData) -> Result<String> {
        let table = self.quote_identifier(&expr.table);
        let mut sql = String::new();
        for row in &expr.rows {
            if row.is_empty() {
                return Err(Error::invalid(&expr.table, "rows", "contain a row without columns"));
            }
            let columns = render::name_list(self, row.iter().map(|(column, _)| column));
            let values = row
                .iter()
                .map(|(_, value)| self.format_literal(value))
                .collect::<Result<Vec<_>>>()?;
            sql.push_str(&format!(
                "INSERT INTO {table} ({columns}) VALUES ({});",
                values.join(",")
            ));
        }
        Ok(sql)
    }
}

/// The built-in dialects, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    /// [`SqliteDialect`].
    #[default]
    Sqlite,
    /// [`PostgresDialect`].
    Postgres,
}

impl DialectKind {
    /// Every built-in dialect.
    pub const ALL: [Self; 2] = [Self::Sqlite, Self::Postgres];

    /// Returns the dialect's name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }

    /// Constructs the dialect.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Sqlite => Box::new(SqliteDialect::new()),
            Self::Postgres => Box::new(PostgresDialect::new()),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect '{0}' (expected one of: sqlite, postgres)")]
pub struct UnknownDialect(pub String);

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}
