//! Column and index DDL rendering shared by all dialects.

use crate::definition::{ColumnDefinition, Direction, IndexDefinition};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::rewrite;
use crate::types::ColumnType;

/// Renders the SQL type of a column.
///
/// Identity columns always use the dialect's identity-backing type; custom
/// types are emitted verbatim.
///
/// # Errors
///
/// Propagates [`Error::UnmappedType`] from the dialect's type map.
pub fn column_type<D: Dialect + ?Sized>(dialect: &D, column: &ColumnDefinition) -> Result<String> {
    let size = column.size.unwrap_or(0);
    let precision = column.precision.unwrap_or(0);
    if column.identity {
        return dialect.type_name(dialect.identity_type(), size, precision);
    }
    match &column.column_type {
        ColumnType::Generic(ty) => dialect.type_name(*ty, size, precision),
        ColumnType::Custom(sql) => Ok(sql.clone()),
    }
}

/// Renders a column definition:
/// `name type [NOT NULL] [DEFAULT v] [IDENTITY] [PRIMARY KEY]`, followed by
/// the dialect's rewrite rules.
///
/// # Errors
///
/// Returns [`Error::InvalidDefinition`] for an invalid column, and propagates
/// type-map and literal errors.
pub fn column<D: Dialect + ?Sized>(dialect: &D, column: &ColumnDefinition) -> Result<String> {
    column.validate()?;

    let mut sql = format!(
        "{} {}",
        dialect.quote_identifier(&column.name),
        dialect.column_type(column)?
    );

    if !column.nullable {
        sql.push_str(" NOT NULL");
    }

    if let Some(ref default) = column.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(&dialect.format_literal(default)?);
    }

    if column.identity {
        sql.push(' ');
        sql.push_str(dialect.identity_keyword());
    }

    if column.primary_key {
        sql.push_str(" PRIMARY KEY");
    }

    Ok(rewrite::apply_all(dialect.column_rewrites(), sql))
}

/// Renders `CREATE [UNIQUE] INDEX [IF NOT EXISTS] name ON table (cols)`.
///
/// # Errors
///
/// Returns [`Error::InvalidDefinition`] when the index has no columns.
pub fn index<D: Dialect + ?Sized>(dialect: &D, index: &IndexDefinition) -> Result<String> {
    if index.columns.is_empty() {
        return Err(Error::invalid(&index.name, "columns", "must not be empty"));
    }

    let mut sql = String::from("CREATE ");
    if index.unique {
        sql.push_str("UNIQUE ");
    }
    sql.push_str("INDEX ");
    if dialect.idempotent_indexes() {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&dialect.quote_identifier(&index.name));
    sql.push_str(" ON ");
    sql.push_str(&dialect.quote_identifier(&index.table));
    sql.push_str(" (");

    let columns: Vec<String> = index
        .columns
        .iter()
        .map(|c| match c.direction {
            Direction::Ascending => dialect.quote_identifier(&c.name).into_owned(),
            Direction::Descending => format!("{} DESC", dialect.quote_identifier(&c.name)),
        })
        .collect();
    sql.push_str(&columns.join(","));
    sql.push(')');

    Ok(sql)
}

/// Quotes and comma-joins a list of names.
#[must_use]
pub fn name_list<'a, D, I>(dialect: &D, names: I) -> String
where
    D: Dialect + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| dialect.quote_identifier(name).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}
