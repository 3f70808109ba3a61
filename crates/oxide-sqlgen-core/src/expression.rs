//! Migration expressions.
//!
//! An [`Expression`] describes one schema or data change without committing
//! to any SQL syntax. Expressions are built once and handed to a
//! [`Generator`](crate::Generator), which renders them for its dialect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::definition::{ColumnDefinition, ForeignKeyDefinition, IndexDefinition, InsertionRow};

/// Creates a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSchema {
    /// Schema name.
    pub name: String,
}

/// Drops a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSchema {
    /// Schema name.
    pub name: String,
}

/// Creates a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTable {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDefinition>,
}

/// Renames a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTable {
    /// Current name.
    pub old_name: String,
    /// New name.
    pub new_name: String,
}

/// Drops a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTable {
    /// Table name.
    pub name: String,
}

/// Adds a column to an existing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateColumn {
    /// Table name.
    pub table: String,
    /// The new column.
    pub column: ColumnDefinition,
}

/// Renames a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameColumn {
    /// Table name.
    pub table: String,
    /// Current column name.
    pub old_name: String,
    /// New column name.
    pub new_name: String,
}

/// Drops a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteColumn {
    /// Table name.
    pub table: String,
    /// Column name.
    pub column: String,
}

/// Adds a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateForeignKey {
    /// The constraint.
    pub foreign_key: ForeignKeyDefinition,
}

/// Drops a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteForeignKey {
    /// Constraint name.
    pub name: String,
    /// Table owning the constraint.
    pub table: String,
}

/// Creates an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndex {
    /// The index.
    pub index: IndexDefinition,
}

/// Drops an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteIndex {
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: String,
}

/// Inserts rows; each row becomes its own statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertData {
    /// Table name.
    pub table: String,
    /// Rows in insertion order.
    pub rows: Vec<InsertionRow>,
}

/// A single dialect-agnostic schema or data change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expression {
    /// CREATE SCHEMA.
    CreateSchema(CreateSchema),
    /// DROP SCHEMA.
    DeleteSchema(DeleteSchema),
    /// CREATE TABLE.
    CreateTable(CreateTable),
    /// Rename a table.
    RenameTable(RenameTable),
    /// DROP TABLE.
    DeleteTable(DeleteTable),
    /// Add a column.
    CreateColumn(CreateColumn),
    /// Rename a column.
    RenameColumn(RenameColumn),
    /// Drop a column.
    DeleteColumn(DeleteColumn),
    /// Add a foreign key.
    CreateForeignKey(CreateForeignKey),
    /// Drop a foreign key.
    DeleteForeignKey(DeleteForeignKey),
    /// CREATE INDEX.
    CreateIndex(CreateIndex),
    /// DROP INDEX.
    DeleteIndex(DeleteIndex),
    /// INSERT rows.
    InsertData(InsertData),
}

/// The kind of an [`Expression`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    /// See [`Expression::CreateSchema`].
    CreateSchema,
    /// See [`Expression::DeleteSchema`].
    DeleteSchema,
    /// See [`Expression::CreateTable`].
    CreateTable,
    /// See [`Expression::RenameTable`].
    RenameTable,
    /// See [`Expression::DeleteTable`].
    DeleteTable,
    /// See [`Expression::CreateColumn`].
    CreateColumn,
    /// See [`Expression::RenameColumn`].
    RenameColumn,
    /// See [`Expression::DeleteColumn`].
    DeleteColumn,
    /// See [`Expression::CreateForeignKey`].
    CreateForeignKey,
    /// See [`Expression::DeleteForeignKey`].
    DeleteForeignKey,
    /// See [`Expression::CreateIndex`].
    CreateIndex,
    /// See [`Expression::DeleteIndex`].
    DeleteIndex,
    /// See [`Expression::InsertData`].
    InsertData,
}

impl ExpressionKind {
    /// Every expression kind.
    pub const ALL: [Self; 13] = [
        Self::CreateSchema,
        Self::DeleteSchema,
        Self::CreateTable,
        Self::RenameTable,
        Self::DeleteTable,
        Self::CreateColumn,
        Self::RenameColumn,
        Self::DeleteColumn,
        Self::CreateForeignKey,
        Self::DeleteForeignKey,
        Self::CreateIndex,
        Self::DeleteIndex,
        Self::InsertData,
    ];

    /// Returns the snake_case name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateSchema => "create_schema",
            Self::DeleteSchema => "delete_schema",
            Self::CreateTable => "create_table",
            Self::RenameTable => "rename_table",
            Self::DeleteTable => "delete_table",
            Self::CreateColumn => "create_column",
            Self::RenameColumn => "rename_column",
            Self::DeleteColumn => "delete_column",
            Self::CreateForeignKey => "create_foreign_key",
            Self::DeleteForeignKey => "delete_foreign_key",
            Self::CreateIndex => "create_index",
            Self::DeleteIndex => "delete_index",
            Self::InsertData => "insert_data",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Expression {
    /// Creates a CreateSchema expression.
    #[must_use]
    pub fn create_schema(name: impl Into<String>) -> Self {
        Self::CreateSchema(CreateSchema { name: name.into() })
    }

    /// Creates a DeleteSchema expression.
    #[must_use]
    pub fn delete_schema(name: impl Into<String>) -> Self {
        Self::DeleteSchema(DeleteSchema { name: name.into() })
    }

    /// Creates a CreateTable expression.
    #[must_use]
    pub fn create_table(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self::CreateTable(CreateTable {
            name: name.into(),
            columns,
        })
    }

    /// Creates a RenameTable expression.
    #[must_use]
    pub fn rename_table(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::RenameTable(RenameTable {
            old_name: old_name.into(),
            new_name: new_name.into(),
        })
    }

    /// Creates a DeleteTable expression.
    #[must_use]
    pub fn delete_table(name: impl Into<String>) -> Self {
        Self::DeleteTable(DeleteTable { name: name.into() })
    }

    /// Creates a CreateColumn expression.
    #[must_use]
    pub fn create_column(table: impl Into<String>, column: ColumnDefinition) -> Self {
        Self::CreateColumn(CreateColumn {
            table: table.into(),
            column,
        })
    }

    /// Creates a RenameColumn expression.
    #[must_use]
    pub fn rename_column(
        table: impl Into<String>,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self::RenameColumn(RenameColumn {
            table: table.into(),
            old_name: old_name.into(),
            new_name: new_name.into(),
        })
    }

    /// Creates a DeleteColumn expression.
    #[must_use]
    pub fn delete_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::DeleteColumn(DeleteColumn {
            table: table.into(),
            column: column.into(),
        })
    }

    /// Creates a CreateForeignKey expression.
    #[must_use]
    pub const fn create_foreign_key(foreign_key: ForeignKeyDefinition) -> Self {
        Self::CreateForeignKey(CreateForeignKey { foreign_key })
    }

    /// Creates a DeleteForeignKey expression.
    #[must_use]
    pub fn delete_foreign_key(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::DeleteForeignKey(DeleteForeignKey {
            name: name.into(),
            table: table.into(),
        })
    }

    /// Creates a CreateIndex expression.
    #[must_use]
    pub const fn create_index(index: IndexDefinition) -> Self {
        Self::CreateIndex(CreateIndex { index })
    }

    /// Creates a DeleteIndex expression.
    #[must_use]
    pub fn delete_index(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::DeleteIndex(DeleteIndex {
            name: name.into(),
            table: table.into(),
        })
    }

    /// Creates an InsertData expression.
    #[must_use]
    pub fn insert_data(table: impl Into<String>, rows: Vec<InsertionRow>) -> Self {
        Self::InsertData(InsertData {
            table: table.into(),
            rows,
        })
    }

    /// Returns the kind of this expression.
    #[must_use]
    pub const fn kind(&self) -> ExpressionKind {
        match self {
            Self::CreateSchema(_) => ExpressionKind::CreateSchema,
            Self::DeleteSchema(_) => ExpressionKind::DeleteSchema,
            Self::CreateTable(_) => ExpressionKind::CreateTable,
            Self::RenameTable(_) => ExpressionKind::RenameTable,
            Self::DeleteTable(_) => ExpressionKind::DeleteTable,
            Self::CreateColumn(_) => ExpressionKind::CreateColumn,
            Self::RenameColumn(_) => ExpressionKind::RenameColumn,
            Self::DeleteColumn(_) => ExpressionKind::DeleteColumn,
            Self::CreateForeignKey(_) => ExpressionKind::CreateForeignKey,
            Self::DeleteForeignKey(_) => ExpressionKind::DeleteForeignKey,
            Self::CreateIndex(_) => ExpressionKind::CreateIndex,
            Self::DeleteIndex(_) => ExpressionKind::DeleteIndex,
            Self::InsertData(_) => ExpressionKind::InsertData,
        }
    }

    /// Returns the expression that undoes this one.
    ///
    /// Returns `None` when the change destroys information needed to undo
    /// it (dropped tables, columns, schemas, keys and indexes) and for
    /// inserted data.
    #[must_use]
    pub fn reverse(&self) -> Option<Self> {
        match self {
            Self::CreateSchema(e) => Some(Self::delete_schema(e.name.clone())),
            Self::CreateTable(e) => Some(Self::delete_table(e.name.clone())),
            Self::RenameTable(e) => Some(Self::rename_table(e.new_name.clone(), e.old_name.clone())),
            Self::CreateColumn(e) => Some(Self::delete_column(e.table.clone(), e.column.name.clone())),
            Self::RenameColumn(e) => Some(Self::rename_column(
                e.table.clone(),
                e.new_name.clone(),
                e.old_name.clone(),
            )),
            Self::CreateForeignKey(e) => Some(Self::delete_foreign_key(
                e.foreign_key.name.clone(),
                e.foreign_key.table.clone(),
            )),
            Self::CreateIndex(e) => Some(Self::delete_index(
                e.index.name.clone(),
                e.index.table.clone(),
            )),
            Self::DeleteSchema(_)
            | Self::DeleteTable(_)
            | Self::DeleteColumn(_)
            | Self::DeleteForeignKey(_)
            | Self::DeleteIndex(_)
            | Self::InsertData(_) => None,
        }
    }
}
