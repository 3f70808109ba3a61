//! Column, index, foreign key and row definitions carried by expressions.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::types::{ColumnType, GenericType};
use crate::value::Value;

/// Definition of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Size (length, or total digits for decimals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Precision (scale for decimals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Whether the column accepts NULL. Columns are NOT NULL unless set.
    #[serde(default)]
    pub nullable: bool,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Whether the column is an identity (auto-numbered) column.
    #[serde(default)]
    pub identity: bool,
    /// Whether the column is the primary key.
    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnDefinition {
    /// Creates a NOT NULL column of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            size: None,
            precision: None,
            nullable: false,
            default: None,
            identity: false,
            primary_key: false,
        }
    }

    /// Creates a column whose type is emitted verbatim.
    #[must_use]
    pub fn custom(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Custom(sql_type.into()))
    }

    /// Sets the size.
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the precision.
    #[must_use]
    pub const fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Allows NULL values.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column as an identity column.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Returns the generic type, if the column is not custom-typed.
    #[must_use]
    pub const fn generic_type(&self) -> Option<GenericType> {
        match self.column_type {
            ColumnType::Generic(ty) => Some(ty),
            ColumnType::Custom(_) => None,
        }
    }

    /// Checks the fields every rendering relies on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] when the name or a custom type
    /// string is empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid(&self.name, "name", "must not be empty"));
        }
        if let ColumnType::Custom(ty) = &self.column_type {
            if ty.trim().is_empty() {
                return Err(Error::invalid(&self.name, "type", "custom type must not be empty"));
            }
        }
        Ok(())
    }
}

/// Sort direction of an index column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ascending (the default).
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

/// One column of an index key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexColumn {
    /// Column name.
    pub name: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: Direction,
}

impl IndexColumn {
    /// Creates an ascending index column.
    #[must_use]
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Ascending,
        }
    }

    /// Creates a descending index column.
    #[must_use]
    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Descending,
        }
    }
}

impl From<&str> for IndexColumn {
    fn from(name: &str) -> Self {
        Self::asc(name)
    }
}

impl From<String> for IndexColumn {
    fn from(name: String) -> Self {
        Self::asc(name)
    }
}

/// Definition of an index. Column order is the key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: String,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub unique: bool,
    /// Key columns, in order.
    pub columns: Vec<IndexColumn>,
}

impl IndexDefinition {
    /// Creates a non-unique index with no columns.
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            unique: false,
            columns: Vec::new(),
        }
    }

    /// Makes the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Appends a key column.
    #[must_use]
    pub fn column(mut self, column: impl Into<IndexColumn>) -> Self {
        self.columns.push(column.into());
        self
    }
}

/// Referential action for ON DELETE / ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict.
    Restrict,
    /// Cascade to referencing rows.
    Cascade,
    /// Set referencing columns to NULL.
    SetNull,
    /// Set referencing columns to their default.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Definition of a foreign key. Columns pair up positionally with the
/// referenced columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKeyDefinition {
    /// Constraint name.
    pub name: String,
    /// Referencing table.
    pub table: String,
    /// Referencing columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns.
    pub referenced_columns: Vec<String>,
    /// Action on delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyDefinition {
    /// Creates a foreign key from `table(columns)` to
    /// `referenced_table(referenced_columns)`.
    #[must_use]
    pub fn new<C, R>(
        name: impl Into<String>,
        table: impl Into<String>,
        columns: C,
        referenced_table: impl Into<String>,
        referenced_columns: R,
    ) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            name: name.into(),
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            referenced_table: referenced_table.into(),
            referenced_columns: referenced_columns.into_iter().map(Into::into).collect(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Checks that both column lists are non-empty and pair up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] naming the offending list.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::invalid(&self.name, "columns", "must not be empty"));
        }
        if self.columns.len() != self.referenced_columns.len() {
            return Err(Error::invalid(
                &self.name,
                "referenced_columns",
                "must pair up with the referencing columns",
            ));
        }
        Ok(())
    }
}

/// One row of data to insert: column names in insertion order, each mapped
/// to a value. Column names are unique within a row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertionRow {
    values: Vec<(String, Value)>,
}

impl InsertionRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value, keeping the column's original position when it
    /// is already present.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
    }

    /// Builder form of [`InsertionRow::set`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Looks up a column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Iterates over `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for InsertionRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.set(column, value);
        }
        row
    }
}

impl Serialize for InsertionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in &self.values {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InsertionRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = InsertionRow;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<InsertionRow, A::Error> {
                let mut values: Vec<(String, Value)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((column, value)) = access.next_entry::<String, Value>()? {
                    if values.iter().any(|(name, _)| *name == column) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate column `{column}` in row"
                        )));
                    }
                    values.push((column, value));
                }
                Ok(InsertionRow { values })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults_to_not_null() {
        let col = ColumnDefinition::new("id", GenericType::Int32);
        assert!(!col.nullable);
        assert!(!col.identity);
        assert!(!col.primary_key);
        assert_eq!(col.generic_type(), Some(GenericType::Int32));
    }

    #[test]
    fn test_column_validation() {
        assert!(ColumnDefinition::new("a", GenericType::String).validate().is_ok());

        let err = ColumnDefinition::new("  ", GenericType::String)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition { field: "name", .. }));

        let err = ColumnDefinition::custom("geo", "").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition { field: "type", .. }));
    }

    #[test]
    fn test_row_keeps_insertion_order_and_unique_columns() {
        let mut row = InsertionRow::new().with("b", 1).with("a", 2);
        row.set("b", 3);

        let columns: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, ["b", "a"]);
        assert_eq!(row.get("b"), Some(&Value::Int(3)));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_deserialize_preserves_document_order() {
        let row: InsertionRow = serde_json::from_str(
            r#"{"zeta": {"kind": "int", "value": 1}, "alpha": {"kind": "null"}}"#,
        )
        .unwrap();
        let columns: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, ["zeta", "alpha"]);
    }

    #[test]
    fn test_row_deserialize_rejects_duplicate_columns() {
        let result: std::result::Result<InsertionRow, _> = serde_json::from_str(
            r#"{"id": {"kind": "int", "value": 1}, "id": {"kind": "int", "value": 2}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_foreign_key_validation() {
        let fk = ForeignKeyDefinition::new("FK_a", "a", ["b_id"], "b", ["id"]);
        assert!(fk.validate().is_ok());

        let fk = ForeignKeyDefinition::new("FK_a", "a", ["b_id", "c_id"], "b", ["id"]);
        assert!(matches!(
            fk.validate(),
            Err(Error::InvalidDefinition {
                field: "referenced_columns",
                ..
            })
        ));

        let fk = ForeignKeyDefinition::new("FK_a", "a", Vec::<String>::new(), "b", ["id"]);
        assert!(matches!(
            fk.validate(),
            Err(Error::InvalidDefinition { field: "columns", .. })
        ));
    }

    #[test]
    fn test_index_builder_keeps_order() {
        let index = IndexDefinition::new("IX", "t")
            .unique()
            .column("b")
            .column(IndexColumn::desc("a"));
        assert!(index.unique);
        assert_eq!(index.columns[0].name, "b");
        assert_eq!(index.columns[1].direction, Direction::Descending);
    }
}
