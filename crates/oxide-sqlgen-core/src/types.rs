//! Generic column types.
//!
//! Migrations describe columns with a [`GenericType`], which every dialect
//! resolves to its own SQL type through its [`TypeMap`](crate::TypeMap).
//! A column can instead carry a raw [`ColumnType::Custom`] string that is
//! emitted verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Database-agnostic data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericType {
    /// True/false.
    Boolean,
    /// Unsigned 8-bit integer.
    Byte,
    /// 16-bit integer.
    Int16,
    /// 32-bit integer.
    Int32,
    /// 64-bit integer.
    Int64,
    /// Single-precision floating point.
    Single,
    /// Double-precision floating point.
    Double,
    /// Exact decimal; size is the total digit count, precision the scale.
    Decimal,
    /// Monetary amount.
    Currency,
    /// Variable-length non-unicode string.
    AnsiString,
    /// Fixed-length non-unicode string.
    AnsiFixedString,
    /// Variable-length unicode string.
    String,
    /// Fixed-length unicode string.
    FixedString,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time without offset.
    DateTime,
    /// Date and time with a UTC offset.
    DateTimeOffset,
    /// Binary data.
    Binary,
    /// 128-bit globally unique identifier.
    Guid,
}

impl GenericType {
    /// Every generic type, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Boolean,
        Self::Byte,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Single,
        Self::Double,
        Self::Decimal,
        Self::Currency,
        Self::AnsiString,
        Self::AnsiFixedString,
        Self::String,
        Self::FixedString,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::DateTimeOffset,
        Self::Binary,
        Self::Guid,
    ];

    /// Returns the snake_case name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Single => "single",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Currency => "currency",
            Self::AnsiString => "ansi_string",
            Self::AnsiFixedString => "ansi_fixed_string",
            Self::String => "string",
            Self::FixedString => "fixed_string",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
            Self::DateTimeOffset => "date_time_offset",
            Self::Binary => "binary",
            Self::Guid => "guid",
        }
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type of a column: either a generic type resolved through the
/// dialect's type map, or a custom SQL type used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Resolved through the dialect's type map.
    Generic(GenericType),
    /// Emitted as-is.
    Custom(String),
}

impl From<GenericType> for ColumnType {
    fn from(ty: GenericType) -> Self {
        Self::Generic(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_snake_case() {
        assert_eq!(GenericType::DateTimeOffset.to_string(), "date_time_offset");
        assert_eq!(GenericType::AnsiFixedString.to_string(), "ansi_fixed_string");
    }

    #[test]
    fn test_all_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for ty in GenericType::ALL {
            assert!(seen.insert(ty), "{ty} listed twice");
        }
    }

    #[test]
    fn test_serde_name_matches_display() {
        for ty in GenericType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{ty}\""));
        }
    }
}
