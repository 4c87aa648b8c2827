//! Built-in MySQL-dialect function implementations.
//!
//! - **Conditional Functions** (ISNULL, IFNULL, IF) - NULL handling
//! - **String Functions** (CONCAT, CONCAT_WS, FIND_IN_SET, FIELD, ELT, TRIM,
//!   LTRIM, RTRIM, INSERT)
//! - **Format Functions** (FORMAT) - grouped decimal rendering
//! - **Date/Time Functions** (DATE_FORMAT, FROM_UNIXTIME, UNIX_TIMESTAMP,
//!   TIMESTAMPDIFF and its per-unit variants)
//! - **Network Functions** (INET_ATON)
//!
//! Every function registers itself with
//! [`register_sql_function!`](crate::register_sql_function) next to its
//! implementation. Handlers are pure: the only shared input is the
//! read-only [`FunctionContext`].

pub mod conditional;
pub mod date_format;
pub mod network;
pub mod numeric_format;
pub mod string;
pub mod temporal;

use super::function_metadata;
use crate::sql::error::{SqlError, SqlResult};
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::types::FieldValue;
use chrono::{DateTime, Utc};

/// Provides built-in SQL function evaluation
pub struct BuiltinFunctions;

impl BuiltinFunctions {
    /// Evaluates a function by name with already-evaluated arguments
    ///
    /// Same as [`function_metadata::invoke_function`]: lookup is
    /// case-insensitive, and arity, implicit casts and strict NULL handling
    /// are applied before the implementation runs.
    pub fn evaluate_function_by_name(
        name: &str,
        args: &[FieldValue],
        ctx: &FunctionContext,
    ) -> Result<FieldValue, SqlError> {
        function_metadata::invoke_function(name, args, ctx)
    }
}

// Argument accessors shared by the implementations. Each returns `Ok(None)`
// for NULL and a type error for a kind the dispatch layer should have
// rejected, so handlers stay total when called directly.

pub(crate) fn arg_value<'a>(
    function: &str,
    args: &'a [FieldValue],
    index: usize,
) -> SqlResult<&'a FieldValue> {
    args.get(index)
        .ok_or_else(|| SqlError::arity_error(function, format!("at least {}", index + 1), args.len()))
}

pub(crate) fn arg_text<'a>(
    function: &str,
    args: &'a [FieldValue],
    index: usize,
) -> SqlResult<Option<&'a str>> {
    match arg_value(function, args, index)? {
        FieldValue::Null => Ok(None),
        FieldValue::String(s) => Ok(Some(s.as_str())),
        other => Err(SqlError::type_error(function, "TEXT", other.type_name())),
    }
}

pub(crate) fn arg_i64(function: &str, args: &[FieldValue], index: usize) -> SqlResult<Option<i64>> {
    match arg_value(function, args, index)? {
        FieldValue::Null => Ok(None),
        FieldValue::Integer(i) => Ok(Some(*i)),
        FieldValue::Boolean(b) => Ok(Some(i64::from(*b))),
        other => Err(SqlError::type_error(function, "INTEGER", other.type_name())),
    }
}

pub(crate) fn arg_bool(function: &str, args: &[FieldValue], index: usize) -> SqlResult<Option<bool>> {
    match arg_value(function, args, index)? {
        FieldValue::Null => Ok(None),
        FieldValue::Boolean(b) => Ok(Some(*b)),
        FieldValue::Integer(i) => Ok(Some(*i != 0)),
        other => Err(SqlError::type_error(function, "BOOLEAN", other.type_name())),
    }
}

pub(crate) fn arg_timestamp(
    function: &str,
    args: &[FieldValue],
    index: usize,
) -> SqlResult<Option<DateTime<Utc>>> {
    match arg_value(function, args, index)? {
        FieldValue::Null => Ok(None),
        FieldValue::Timestamp(ts) => Ok(Some(*ts)),
        other => Err(SqlError::type_error(function, "TIMESTAMP", other.type_name())),
    }
}
