#![allow(dead_code)]

use oxide_sqlgen_core::prelude::*;

pub fn sqlite() -> Generator {
    Generator::new(SqliteDialect::new())
}

pub fn postgres() -> Generator {
    Generator::new(PostgresDialect::new())
}

pub fn generate(generator: &Generator, expression: &Expression) -> String {
    generator
        .generate(expression)
        .unwrap_or_else(|e| panic!("Failed to generate {expression:?}\nError: {e}"))
}

pub fn generate_err(generator: &Generator, expression: &Expression) -> Error {
    match generator.generate(expression) {
        Ok(sql) => panic!("Expected generation error for: {expression:?}\nGot: {sql}"),
        Err(e) => e,
    }
}

/// The `users` table used across the dialect tests.
pub fn users_table() -> Expression {
    Expression::create_table(
        "users",
        vec![
            ColumnDefinition::new("id", GenericType::Int64)
                .identity()
                .primary_key(),
            ColumnDefinition::new("email", GenericType::String).size(255),
            ColumnDefinition::new("active", GenericType::Boolean).default(true),
            ColumnDefinition::new("bio", GenericType::String).nullable(),
        ],
    )
}

/// The two `People` rows from the insertion examples.
pub fn people_rows() -> Expression {
    Expression::insert_data(
        "People",
        vec![
            InsertionRow::new().with("Id", 1).with("Name", "O'Brien"),
            InsertionRow::new().with("Id", 2).with("Name", "Lee"),
        ],
    )
}
