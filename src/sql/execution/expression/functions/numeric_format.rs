//! FORMAT(number, decimals): grouped-thousands decimal rendering.

use super::{arg_i64, arg_value};
use crate::register_sql_function;
use crate::sql::error::SqlError;
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::expression::function_metadata::{
    FunctionCategory, FunctionSignature, ParamKind, ReturnKind,
};
use crate::sql::execution::types::{FieldValue, ValueKind};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale a `Decimal` can carry; wider requests are zero-padded
const DECIMAL_MAX_SCALE: u32 = 28;

/// FORMAT(number, decimals) → `"1,234,567.89"`.
///
/// Fraction digits are truncated, never rounded, and zero-padded up to
/// `decimals`. `decimals <= 0` renders no decimal point. Non-finite floats
/// and values outside the decimal range yield NULL.
pub fn format_function(args: &[FieldValue], ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let Some(decimals) = arg_i64("FORMAT", args, 1)? else {
        return Ok(FieldValue::Null);
    };
    let number = match arg_value("FORMAT", args, 0)? {
        FieldValue::Null => return Ok(FieldValue::Null),
        FieldValue::Integer(i) => Decimal::from(*i),
        FieldValue::Boolean(b) => Decimal::from(i64::from(*b)),
        FieldValue::Decimal(d) => *d,
        FieldValue::Float(f) => match Decimal::from_f64(*f) {
            Some(d) if f.is_finite() => d,
            _ => {
                log::debug!("FORMAT: {} has no decimal representation", f);
                return Ok(FieldValue::Null);
            }
        },
        other => return Err(SqlError::type_error("FORMAT", "NUMERIC", other.type_name())),
    };

    let max = ctx.config().format_max_decimals;
    let decimals = u32::try_from(decimals.max(0)).unwrap_or(u32::MAX).min(max);

    Ok(FieldValue::String(format_grouped(number, decimals)))
}

/// Render `number` with `decimals` truncated fraction digits and `,`
/// between every three integer digits.
pub fn format_grouped(number: Decimal, decimals: u32) -> String {
    let truncated =
        number.round_dp_with_strategy(decimals.min(DECIMAL_MAX_SCALE), RoundingStrategy::ToZero);

    let digits = truncated.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + decimals as usize + 2);
    if truncated.is_sign_negative() && !truncated.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));

    if decimals > 0 {
        out.push('.');
        out.push_str(frac_part);
        for _ in frac_part.len()..decimals as usize {
            out.push('0');
        }
    }
    out
}

/// Insert `,` every three digits counting leftward
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

register_sql_function!(
    name: "FORMAT",
    aliases: [],
    category: FunctionCategory::Math,
    signature: FunctionSignature::fixed(
        &[ParamKind::Numeric, ParamKind::Integer],
        ReturnKind::Fixed(ValueKind::String)
    ),
    description: "Number with thousands separators and a fixed count of truncated decimals",
    handler: format_function
);
