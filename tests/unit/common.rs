//! Shared helpers for function tests

use mysql_compat::{CompatConfig, FieldValue, FunctionContext, SqlResult, invoke_function};

/// Evaluate with the default configuration, panicking on contract errors
pub fn eval(name: &str, args: &[FieldValue]) -> FieldValue {
    try_eval(name, args).unwrap_or_else(|e| panic!("{} failed: {}", name, e))
}

pub fn try_eval(name: &str, args: &[FieldValue]) -> SqlResult<FieldValue> {
    invoke_function(name, args, &FunctionContext::default())
}

/// Evaluate with a specific configuration
pub fn eval_with(config: CompatConfig, name: &str, args: &[FieldValue]) -> FieldValue {
    invoke_function(name, args, &FunctionContext::new(config))
        .unwrap_or_else(|e| panic!("{} failed: {}", name, e))
}

pub fn text(s: &str) -> FieldValue {
    FieldValue::text(s)
}

pub fn int(i: i64) -> FieldValue {
    FieldValue::Integer(i)
}

pub fn ts(literal: &str) -> FieldValue {
    FieldValue::parse_timestamp(literal).unwrap()
}

pub fn dec(literal: &str) -> FieldValue {
    FieldValue::parse_decimal(literal).unwrap()
}
