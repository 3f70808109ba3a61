//! Dialect-aware SQL generation for database-agnostic migration expressions.
//!
//! `oxide-sqlgen-core` turns an [`Expression`] (create a table, add an index,
//! insert rows, ...) into SQL text for a specific database engine. A single
//! migration definition can therefore run unmodified against several
//! engines: all syntax decisions are deferred to a [`Dialect`].
//!
//! # Architecture
//!
//! - **Type map** ([`TypeMap`]) - resolves a [`GenericType`] and size to a
//!   dialect type template.
//! - **Literals** ([`literal`]) - renders [`Value`]s as SQL literals.
//! - **Renderer** ([`render`]) - column and index DDL fragments.
//! - **Dialects** ([`SqliteDialect`], [`PostgresDialect`]) - type maps,
//!   support policy and per-expression rendering hooks.
//! - **Generator** ([`Generator`]) - dispatches expressions to the dialect.
//!
//! Generation is pure: no I/O, no shared mutable state. Dialects build their
//! type maps on construction and never change them afterwards.
//!
//! # Example
//!
//! ```rust
//! use oxide_sqlgen_core::prelude::*;
//!
//! let generator = Generator::new(SqliteDialect::new());
//!
//! let create = Expression::create_table(
//!     "users",
//!     vec![
//!         ColumnDefinition::new("id", GenericType::Int64).identity().primary_key(),
//!         ColumnDefinition::new("email", GenericType::String).size(255),
//!     ],
//! );
//! assert_eq!(
//!     generator.generate(&create).unwrap(),
//!     "CREATE TABLE users (id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, email TEXT NOT NULL)"
//! );
//!
//! let index = Expression::create_index(
//!     IndexDefinition::new("IX_User_Email", "User").unique().column("Email"),
//! );
//! assert_eq!(
//!     generator.generate(&index).unwrap(),
//!     "CREATE UNIQUE INDEX IF NOT EXISTS IX_User_Email ON User (Email)"
//! );
//! ```

pub mod definition;
pub mod dialect;
pub mod error;
pub mod expression;
pub mod generator;
pub mod literal;
pub mod render;
pub mod rewrite;
pub mod typemap;
pub mod types;
pub mod value;

pub use definition::{
    ColumnDefinition, Direction, ForeignKeyAction, ForeignKeyDefinition, IndexColumn,
    IndexDefinition, InsertionRow,
};
pub use dialect::{Dialect, DialectKind, PostgresDialect, SqliteDialect, Support, UnknownDialect};
pub use error::{Error, Result};
pub use expression::{Expression, ExpressionKind};
pub use generator::Generator;
pub use rewrite::Rewrite;
pub use typemap::{TypeMap, TypeMapBuilder};
pub use types::{ColumnType, GenericType};
pub use value::Value;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::definition::{
        ColumnDefinition, Direction, ForeignKeyAction, ForeignKeyDefinition, IndexColumn,
        IndexDefinition, InsertionRow,
    };
    pub use crate::dialect::{Dialect, DialectKind, PostgresDialect, SqliteDialect, Support};
    pub use crate::error::{Error, Result};
    pub use crate::expression::{Expression, ExpressionKind};
    pub use crate::generator::Generator;
    pub use crate::types::{ColumnType, GenericType};
    pub use crate::value::Value;
}
