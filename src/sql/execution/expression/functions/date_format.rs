//! DATE_FORMAT(timestamp, pattern)
//!
//! The pattern is scanned once, left to right. Characters other than `%`
//! are copied; `%x` is replaced by one rendering from this table:
//!
//! | Directive | Rendering                          |
//! |-----------|------------------------------------|
//! | `%Y`      | year, zero-padded to 4             |
//! | `%y`      | year % 100, zero-padded to 2       |
//! | `%m`      | month, 2 digits                    |
//! | `%c`      | month, unpadded                    |
//! | `%d`      | day of month, 2 digits             |
//! | `%H`      | hour 00-23                         |
//! | `%h`      | hour 01-12                         |
//! | `%i`      | minute, 2 digits                   |
//! | `%s`      | second, 2 digits                   |
//! | `%p`      | `AM` / `PM`                        |
//! | `%W`      | weekday name (`Sunday`..`Saturday`) |
//! | `%%`      | `%`                                |
//!
//! Any other directive character is copied literally, and a lone trailing
//! `%` is kept as `%`.

use super::{arg_text, arg_timestamp};
use super::temporal::CalendarBreakdown;
use crate::register_sql_function;
use crate::sql::error::SqlError;
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::expression::function_metadata::{
    FunctionCategory, FunctionSignature, ParamKind, ReturnKind, Volatility,
};
use crate::sql::execution::types::{FieldValue, ValueKind};
use std::fmt::Write;

pub fn date_format_function(
    args: &[FieldValue],
    ctx: &FunctionContext,
) -> Result<FieldValue, SqlError> {
    let (Some(ts), Some(pattern)) = (
        arg_timestamp("DATE_FORMAT", args, 0)?,
        arg_text("DATE_FORMAT", args, 1)?,
    ) else {
        return Ok(FieldValue::Null);
    };

    let cal = CalendarBreakdown::from_timestamp(&ts, &ctx.config().session_time_zone);
    Ok(FieldValue::String(render_pattern(&cal, pattern)))
}

/// Expand every directive in `pattern` against `cal`
pub fn render_pattern(cal: &CalendarBreakdown, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(directive) => push_directive(&mut out, cal, directive),
            None => out.push('%'),
        }
    }
    out
}

fn push_directive(out: &mut String, cal: &CalendarBreakdown, directive: char) {
    // Writing into a String cannot fail
    let _ = match directive {
        'Y' => write!(out, "{:04}", cal.year),
        'y' => write!(out, "{:02}", cal.year.rem_euclid(100)),
        'm' => write!(out, "{:02}", cal.month),
        'c' => write!(out, "{}", cal.month),
        'd' => write!(out, "{:02}", cal.day),
        'H' => write!(out, "{:02}", cal.hour),
        'h' => write!(out, "{:02}", twelve_hour(cal.hour)),
        'i' => write!(out, "{:02}", cal.minute),
        's' => write!(out, "{:02}", cal.second),
        'p' => out.write_str(if cal.hour >= 12 { "PM" } else { "AM" }),
        'W' => out.write_str(cal.weekday_name()),
        other => out.write_char(other),
    };
}

fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

register_sql_function!(
    name: "DATE_FORMAT",
    aliases: [],
    category: FunctionCategory::DateTime,
    signature: FunctionSignature::fixed(
        &[ParamKind::Timestamp, ParamKind::Text],
        ReturnKind::Fixed(ValueKind::String)
    )
    .with_volatility(Volatility::Stable),
    description: "Render a timestamp through a %-directive pattern",
    handler: date_format_function
);
