//! SQL literal formatting.
//!
//! Strings are single-quoted with embedded quotes doubled; that doubling is
//! the only escaping applied. Numbers use Rust's locale-independent
//! formatting, which never adds separators, suffixes or exponents.
//! Temporal values are quoted in `YYYY-MM-DD HH:MM:SS` form; fractional
//! seconds are kept (as 3, 6 or 9 digits) whenever they are non-zero.
//!
//! Booleans and byte blocks have no portable spelling, so those go through
//! the dialect.

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::value::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_TIME_OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Formats a value as a literal for the given dialect.
///
/// # Errors
///
/// Returns [`Error::UnsupportedLiteral`] for non-finite floats and for value
/// kinds the dialect rejects.
pub fn format_literal<D: Dialect + ?Sized>(dialect: &D, value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(b) => Ok(dialect.format_bool(*b).to_string()),
        Value::Int(n) => Ok(n.to_string()),
        Value::UInt(n) => Ok(n.to_string()),
        Value::Float(f) => format_float(*f),
        Value::Text(s) => Ok(quote(s)),
        Value::Char(c) => Ok(quote(c.encode_utf8(&mut [0; 4]))),
        Value::Date(d) => Ok(quote(&d.format(DATE_FORMAT).to_string())),
        Value::Time(t) => Ok(quote(&t.format(TIME_FORMAT).to_string())),
        Value::DateTime(dt) => Ok(quote(&dt.format(DATE_TIME_FORMAT).to_string())),
        Value::DateTimeOffset(dt) => Ok(quote(&dt.format(DATE_TIME_OFFSET_FORMAT).to_string())),
        Value::Guid(g) => Ok(quote(&g.hyphenated().to_string())),
        Value::Bytes(bytes) => dialect.format_bytes(bytes),
    }
}

/// Single-quotes a string, doubling embedded single quotes.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Renders bytes as uppercase hex digits.
#[must_use]
pub fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02X}")).collect()
}

/// Renders bytes as lowercase hex digits.
#[must_use]
pub fn hex_lower(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn format_float(f: f64) -> Result<String> {
    if f.is_finite() {
        Ok(f.to_string())
    } else {
        Err(Error::UnsupportedLiteral {
            kind: "non-finite float",
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use uuid::Uuid;

    use super::*;
    use crate::dialect::SqliteDialect;

    fn fmt(value: impl Into<Value>) -> Result<String> {
        format_literal(&SqliteDialect::new(), &value.into())
    }

    /// Reverses [`quote`]: strips the outer quotes and collapses `''`.
    fn unquote(literal: &str) -> String {
        literal[1..literal.len() - 1].replace("''", "'")
    }

    #[test]
    fn test_null_and_numbers() {
        assert_eq!(fmt(Value::Null).unwrap(), "NULL");
        assert_eq!(fmt(-42_i64).unwrap(), "-42");
        assert_eq!(fmt(u64::MAX).unwrap(), "18446744073709551615");
        assert_eq!(fmt(1.5_f64).unwrap(), "1.5");
        assert_eq!(fmt(1_000_000.0_f64).unwrap(), "1000000");
        assert_eq!(fmt(0.000_000_1_f64).unwrap(), "0.0000001");
    }

    #[test]
    fn test_f32_renders_as_written() {
        assert_eq!(fmt(0.1_f32).unwrap(), "0.1");
        assert_eq!(fmt(2.75_f32).unwrap(), "2.75");
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                fmt(f),
                Err(Error::UnsupportedLiteral {
                    kind: "non-finite float"
                })
            );
        }
    }

    #[test]
    fn test_strings_double_quotes_only() {
        assert_eq!(fmt("O'Brien").unwrap(), "'O''Brien'");
        assert_eq!(fmt("';DROP TABLE x;--").unwrap(), "''';DROP TABLE x;--'");
        assert_eq!(fmt("back\\slash \"dq\"").unwrap(), "'back\\slash \"dq\"'");
        assert_eq!(fmt('\'').unwrap(), "''''");
    }

    #[test]
    fn test_quote_round_trips() {
        for s in ["", "'", "''", "a'b'c", "';DROP TABLE x;--", "naïve 'ü'"] {
            let literal = quote(s);
            assert!(literal.starts_with('\'') && literal.ends_with('\''));
            assert_eq!(
                literal.matches('\'').count(),
                2 + 2 * s.matches('\'').count()
            );
            assert_eq!(unquote(&literal), s);
        }
    }

    #[test]
    fn test_temporal_values() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let dt = date.and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(fmt(date).unwrap(), "'2024-01-02'");
        assert_eq!(fmt(dt).unwrap(), "'2024-01-02 03:04:05'");
        assert_eq!(fmt(dt.time()).unwrap(), "'03:04:05'");

        let millis = date.and_hms_milli_opt(3, 4, 5, 120).unwrap();
        assert_eq!(fmt(millis).unwrap(), "'2024-01-02 03:04:05.120'");
        let micros = date.and_hms_micro_opt(3, 4, 5, 1).unwrap();
        assert_eq!(fmt(micros).unwrap(), "'2024-01-02 03:04:05.000001'");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let aware = offset.from_local_datetime(&dt).unwrap();
        assert_eq!(fmt(aware).unwrap(), "'2024-01-02 03:04:05+02:00'");
    }

    #[test]
    fn test_guid_is_quoted_canonical_form() {
        let id = Uuid::parse_str("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(fmt(id).unwrap(), "'67e55044-10b1-426f-9247-bb680e5fe0c8'");
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(hex_upper(&[0xde, 0xad, 0x01]), "DEAD01");
        assert_eq!(hex_lower(&[0xde, 0xad, 0x01]), "dead01");
        assert_eq!(hex_upper(&[]), "");
    }
}
