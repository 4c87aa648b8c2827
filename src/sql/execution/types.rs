//! Core scalar value types.
//!
//! This module contains the value type passed into and returned from every
//! function in the library:
//! - [`FieldValue`] - a tagged union of the supported SQL scalar types
//! - [`ValueKind`] - the discriminant of a [`FieldValue`], used by signatures

use crate::sql::error::{SqlError, SqlResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A scalar SQL value
///
/// `Null` carries no payload and is distinct from every concrete value,
/// including the empty string and zero.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL NULL value
    Null,
    /// Boolean value (true/false)
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Exact decimal (NUMERIC)
    Decimal(Decimal),
    /// UTF-8 string
    String(String),
    /// Timestamp with time zone, stored as a UTC instant
    Timestamp(DateTime<Utc>),
}

/// Concrete kind of a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Decimal,
    Float,
    String,
    Timestamp,
}

impl ValueKind {
    /// SQL-facing name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "NULL",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Integer => "INTEGER",
            ValueKind::Decimal => "DECIMAL",
            ValueKind::Float => "FLOAT",
            ValueKind::String => "STRING",
            ValueKind::Timestamp => "TIMESTAMP",
        }
    }

    /// True for the kinds that take part in numeric promotion
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueKind::Integer | ValueKind::Decimal | ValueKind::Float
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            other => write!(f, "{}", other.to_display_string()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            // Serialize as string for precision
            FieldValue::Decimal(dec) => serializer.serialize_str(&dec.to_string()),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Timestamp(_) => serializer.serialize_str(&self.to_display_string()),
        }
    }
}

impl FieldValue {
    /// Discriminant of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Null => ValueKind::Null,
            FieldValue::Boolean(_) => ValueKind::Boolean,
            FieldValue::Integer(_) => ValueKind::Integer,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Decimal(_) => ValueKind::Decimal,
            FieldValue::String(_) => ValueKind::String,
            FieldValue::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    /// Get the type name for error messages and debugging
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Check if this value represents a numeric type
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Textual rendering used wherever a value is coerced to text
    ///
    /// Booleans render as `1`/`0` the way the dialect treats them as
    /// integers. Timestamps render as `YYYY-MM-DD HH:MM:SS`, with a
    /// six-digit fraction only when the instant has sub-second precision.
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Null => "NULL".to_string(),
            FieldValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Decimal(dec) => dec.to_string(),
            FieldValue::String(s) => s.clone(),
            FieldValue::Timestamp(ts) => {
                if ts.timestamp_subsec_micros() == 0 {
                    ts.format("%Y-%m-%d %H:%M:%S").to_string()
                } else {
                    ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
                }
            }
        }
    }

    /// Text payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Convert this value to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Boolean(b) => serde_json::Value::Bool(*b),
            FieldValue::Integer(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Decimal(_) | FieldValue::String(_) | FieldValue::Timestamp(_) => {
                serde_json::Value::String(self.to_display_string())
            }
        }
    }

    /// Build a string value
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::String(s.into())
    }

    /// Parse a timestamp literal interpreted as UTC
    ///
    /// Accepts `YYYY-MM-DD HH:MM:SS[.fraction]`, the same with a `T`
    /// separator, and a bare `YYYY-MM-DD` (midnight).
    pub fn parse_timestamp(literal: &str) -> SqlResult<FieldValue> {
        let literal = literal.trim();
        let parsed = NaiveDateTime::parse_from_str(literal, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| {
                NaiveDate::parse_from_str(literal, "%Y-%m-%d")
                    .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
            })
            .map_err(|e| {
                SqlError::execution_error(
                    "TIMESTAMP",
                    format!("Invalid timestamp literal '{}': {}", literal, e),
                )
            })?;
        Ok(FieldValue::Timestamp(parsed.and_utc()))
    }

    /// Parse a decimal literal
    pub fn parse_decimal(literal: &str) -> SqlResult<FieldValue> {
        Decimal::from_str(literal.trim())
            .map(FieldValue::Decimal)
            .map_err(|e| {
                SqlError::execution_error(
                    "DECIMAL",
                    format!("Invalid decimal literal '{}': {}", literal, e),
                )
            })
    }
}
