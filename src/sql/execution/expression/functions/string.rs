//! String functions: CONCAT, CONCAT_WS, FIND_IN_SET, FIELD, ELT, TRIM,
//! LTRIM, RTRIM and INSERT.
//!
//! Positions and lengths count characters, never bytes, so multi-byte
//! UTF-8 input can not be split inside a code point.

use super::{arg_i64, arg_text, arg_value};
use crate::register_sql_function;
use crate::sql::error::SqlError;
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::expression::function_metadata::{
    FunctionCategory, FunctionSignature, ParamKind, ReturnKind, Volatility,
};
use crate::sql::execution::types::{FieldValue, ValueKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;

/// Whitespace stripped around FIND_IN_SET tokens
const SET_TOKEN_WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// Which end(s) a trim call strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimMode {
    Both,
    Leading,
    Trailing,
}

/// CONCAT(v1, ..., vn): NULL if any argument is NULL, else the textual join.
pub fn concat_function(args: &[FieldValue], _ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let mut result = String::new();
    for value in args {
        if value.is_null() {
            return Ok(FieldValue::Null);
        }
        push_text(&mut result, value);
    }
    Ok(FieldValue::String(result))
}

/// CONCAT_WS(sep, v1, ..., vn): join the non-NULL values with `sep`.
///
/// NULL values are skipped without emitting a separator. A NULL separator,
/// or no non-NULL value at all, yields NULL.
pub fn concat_ws_function(
    args: &[FieldValue],
    _ctx: &FunctionContext,
) -> Result<FieldValue, SqlError> {
    let Some(separator) = arg_text("CONCAT_WS", args, 0)? else {
        return Ok(FieldValue::Null);
    };

    let mut result = String::new();
    let mut first = true;
    for value in args.iter().skip(1).filter(|v| !v.is_null()) {
        if !first {
            result.push_str(separator);
        }
        push_text(&mut result, value);
        first = false;
    }

    if first {
        return Ok(FieldValue::Null);
    }
    Ok(FieldValue::String(result))
}

/// FIND_IN_SET(needle, list): 1-based position of `needle` in a comma list.
///
/// Tokens are trimmed of surrounding whitespace before comparison. Empty
/// tokens (consecutive commas) are not counted. No match answers 0.
pub fn find_in_set_function(
    args: &[FieldValue],
    _ctx: &FunctionContext,
) -> Result<FieldValue, SqlError> {
    let (Some(needle), Some(list)) = (
        arg_text("FIND_IN_SET", args, 0)?,
        arg_text("FIND_IN_SET", args, 1)?,
    ) else {
        return Ok(FieldValue::Null);
    };

    let position = list
        .split(',')
        .filter(|token| !token.is_empty())
        .position(|token| token.trim_matches(SET_TOKEN_WHITESPACE) == needle)
        .map_or(0, |index| index as i64 + 1);

    Ok(FieldValue::Integer(position))
}

/// FIELD(needle, v1, ..., vn): 1-based index of the first vi equal to needle.
///
/// NULL candidates never match; a NULL needle answers 0.
pub fn field_function(args: &[FieldValue], _ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let needle = arg_value("FIELD", args, 0)?;
    if needle.is_null() {
        return Ok(FieldValue::Integer(0));
    }

    let index = args
        .iter()
        .skip(1)
        .position(|candidate| values_equal(needle, candidate))
        .map_or(0, |i| i as i64 + 1);

    Ok(FieldValue::Integer(index))
}

/// ELT(n, v1, ..., vm): the n-th value, or NULL when n is outside 1..=m.
///
/// A fractional selector is rounded half away from zero first.
pub fn elt_function(args: &[FieldValue], _ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let selector = match arg_value("ELT", args, 0)? {
        FieldValue::Null => return Ok(FieldValue::Null),
        FieldValue::Decimal(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64(),
        FieldValue::Float(f) => f.round().to_i64(),
        _ => arg_i64("ELT", args, 0)?,
    };
    let Some(n) = selector else {
        return Ok(FieldValue::Null);
    };

    let selected = usize::try_from(n)
        .ok()
        .filter(|&index| index >= 1)
        .and_then(|index| args.get(index));

    Ok(selected.cloned().unwrap_or(FieldValue::Null))
}

pub fn trim_function(args: &[FieldValue], ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    trim_family("TRIM", TrimMode::Both, args, ctx)
}

pub fn ltrim_function(args: &[FieldValue], ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    trim_family("LTRIM", TrimMode::Leading, args, ctx)
}

pub fn rtrim_function(args: &[FieldValue], ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    trim_family("RTRIM", TrimMode::Trailing, args, ctx)
}

fn trim_family(
    name: &str,
    mode: TrimMode,
    args: &[FieldValue],
    ctx: &FunctionContext,
) -> Result<FieldValue, SqlError> {
    let Some(source) = arg_text(name, args, 0)? else {
        return Ok(FieldValue::Null);
    };
    let chars = if args.len() > 1 {
        match arg_text(name, args, 1)? {
            Some(chars) => chars,
            None => return Ok(FieldValue::Null),
        }
    } else {
        ctx.config().default_trim_chars.as_str()
    };

    Ok(FieldValue::String(trim_chars(source, chars, mode).to_string()))
}

/// Strip every character of `set` from the requested end(s) of `source`.
pub fn trim_chars<'a>(source: &'a str, set: &str, mode: TrimMode) -> &'a str {
    let in_set = |c: char| set.contains(c);
    match mode {
        TrimMode::Both => source.trim_matches(in_set),
        TrimMode::Leading => source.trim_start_matches(in_set),
        TrimMode::Trailing => source.trim_end_matches(in_set),
    }
}

/// INSERT(str, pos, len, newstr): replace `len` characters at `pos`.
///
/// Bounds are clamped:
/// - `pos` outside `1..=length(str)+1` returns `str` unchanged
/// - a negative `len`, or one running past the end, replaces through the end
pub fn insert_function(args: &[FieldValue], _ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let (Some(source), Some(pos), Some(len), Some(replacement)) = (
        arg_text("INSERT", args, 0)?,
        arg_i64("INSERT", args, 1)?,
        arg_i64("INSERT", args, 2)?,
        arg_text("INSERT", args, 3)?,
    ) else {
        return Ok(FieldValue::Null);
    };

    Ok(FieldValue::String(splice(source, pos, len, replacement)))
}

/// Bounds-checked splice behind INSERT
pub fn splice(source: &str, pos: i64, len: i64, replacement: &str) -> String {
    let char_count = source.chars().count();
    let start = match usize::try_from(pos) {
        Ok(p) if p >= 1 && p <= char_count + 1 => p - 1,
        _ => {
            log::trace!("INSERT position {} outside 1..={}, returning input", pos, char_count + 1);
            return source.to_string();
        }
    };

    let remaining = char_count - start;
    let span = match usize::try_from(len) {
        Ok(l) if l <= remaining => l,
        _ => {
            log::trace!("INSERT length {} clamped to {}", len, remaining);
            remaining
        }
    };

    let start_byte = byte_offset(source, start);
    let end_byte = byte_offset(source, start + span);

    let mut result = String::with_capacity(source.len() - (end_byte - start_byte) + replacement.len());
    result.push_str(&source[..start_byte]);
    result.push_str(replacement);
    result.push_str(&source[end_byte..]);
    result
}

/// Byte offset of the `char_index`-th character, or the end of the string
fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(offset, _)| offset)
}

fn push_text(buf: &mut String, value: &FieldValue) {
    match value {
        FieldValue::String(s) => buf.push_str(s),
        other => buf.push_str(&other.to_display_string()),
    }
}

/// FIELD equality.
///
/// Text compares exactly. INTEGER, DECIMAL and BOOLEAN compare exactly as
/// decimals; a FLOAT on either side compares as f64. Any other pair compares
/// textual renderings. NULL never equals anything.
fn values_equal(left: &FieldValue, right: &FieldValue) -> bool {
    match (left, right) {
        (FieldValue::Null, _) | (_, FieldValue::Null) => false,
        (FieldValue::String(a), FieldValue::String(b)) => a == b,
        (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a == b,
        (FieldValue::Float(_), _) | (_, FieldValue::Float(_)) => match (as_f64(left), as_f64(right)) {
            (Some(x), Some(y)) => float_equals_exact(x, y, left, right),
            _ => left.to_display_string() == right.to_display_string(),
        },
        _ => match (as_decimal(left), as_decimal(right)) {
            (Some(x), Some(y)) => x == y,
            _ => left.to_display_string() == right.to_display_string(),
        },
    }
}

/// f64 comparison that refuses a match created by rounding an integer
/// into the f64 range.
fn float_equals_exact(x: f64, y: f64, left: &FieldValue, right: &FieldValue) -> bool {
    x.partial_cmp(&y) == Some(Ordering::Equal)
        && [left, right].into_iter().all(|value| match value {
            FieldValue::Integer(i) => (*i as f64) as i128 == i128::from(*i),
            _ => true,
        })
}

fn as_decimal(value: &FieldValue) -> Option<Decimal> {
    match value {
        FieldValue::Integer(i) => Some(Decimal::from(*i)),
        FieldValue::Decimal(d) => Some(*d),
        FieldValue::Boolean(b) => Some(Decimal::from(i64::from(*b))),
        _ => None,
    }
}

fn as_f64(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Integer(i) => Some(*i as f64),
        FieldValue::Float(f) => Some(*f),
        FieldValue::Decimal(d) => d.to_f64(),
        FieldValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

register_sql_function!(
    name: "CONCAT",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::variadic(&[], ParamKind::Any, 1, ReturnKind::Fixed(ValueKind::String))
        .with_volatility(Volatility::Stable),
    description: "Concatenate the arguments; NULL if any argument is NULL",
    handler: concat_function
);

register_sql_function!(
    name: "CONCAT_WS",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::variadic(
        &[ParamKind::Text],
        ParamKind::Any,
        1,
        ReturnKind::Fixed(ValueKind::String)
    )
    .non_strict()
    .with_volatility(Volatility::Stable),
    description: "Join the non-NULL arguments with a separator",
    handler: concat_ws_function
);

register_sql_function!(
    name: "FIND_IN_SET",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::fixed(
        &[ParamKind::Text, ParamKind::Text],
        ReturnKind::Fixed(ValueKind::Integer)
    ),
    description: "1-based position of a string within a comma-separated list, 0 if absent",
    handler: find_in_set_function
);

register_sql_function!(
    name: "FIELD",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::variadic(
        &[ParamKind::Any],
        ParamKind::Any,
        2,
        ReturnKind::Fixed(ValueKind::Integer)
    )
    .non_strict(),
    description: "1-based index of the first argument equal to the first, 0 if none",
    handler: field_function
);

register_sql_function!(
    name: "ELT",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::variadic(
        &[ParamKind::Numeric],
        ParamKind::Any,
        2,
        ReturnKind::Polymorphic
    )
    .non_strict(),
    description: "The N-th (rounded) of the following arguments, NULL when N is out of range",
    handler: elt_function
);

register_sql_function!(
    name: "TRIM",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::optional(
        &[ParamKind::Text, ParamKind::Text],
        1,
        ReturnKind::Fixed(ValueKind::String)
    )
    .with_volatility(Volatility::Stable),
    description: "Strip a character set (default whitespace) from both ends",
    handler: trim_function
);

register_sql_function!(
    name: "LTRIM",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::optional(
        &[ParamKind::Text, ParamKind::Text],
        1,
        ReturnKind::Fixed(ValueKind::String)
    )
    .with_volatility(Volatility::Stable),
    description: "Strip a character set (default whitespace) from the start",
    handler: ltrim_function
);

register_sql_function!(
    name: "RTRIM",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::optional(
        &[ParamKind::Text, ParamKind::Text],
        1,
        ReturnKind::Fixed(ValueKind::String)
    )
    .with_volatility(Volatility::Stable),
    description: "Strip a character set (default whitespace) from the end",
    handler: rtrim_function
);

register_sql_function!(
    name: "INSERT",
    aliases: [],
    category: FunctionCategory::String,
    signature: FunctionSignature::fixed(
        &[ParamKind::Text, ParamKind::Integer, ParamKind::Integer, ParamKind::Text],
        ReturnKind::Fixed(ValueKind::String)
    ),
    description: "Replace LEN characters starting at POS with another string",
    handler: insert_function
);
