//! NULL-handling functions: ISNULL, IFNULL, IF.
//!
//! None of these is strict: each one exists to look at NULL arguments.

use super::{arg_bool, arg_value};
use crate::register_sql_function;
use crate::sql::error::SqlError;
use crate::sql::execution::casts::coerce_to_common;
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::expression::function_metadata::{
    FunctionCategory, FunctionSignature, ParamKind, ReturnKind, Volatility,
};
use crate::sql::execution::types::{FieldValue, ValueKind};

/// ISNULL(x): 1 when x is NULL, else 0. Never NULL itself.
pub fn isnull_function(args: &[FieldValue], _ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let value = arg_value("ISNULL", args, 0)?;
    Ok(FieldValue::Integer(i64::from(value.is_null())))
}

/// IFNULL(a, b): a unless it is NULL, otherwise b.
///
/// The result takes the common type of both arguments, so
/// `IFNULL(1, 2.5)` answers FLOAT 1.0.
pub fn ifnull_function(args: &[FieldValue], _ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let a = arg_value("IFNULL", args, 0)?;
    let b = arg_value("IFNULL", args, 1)?;

    let chosen = if a.is_null() { b.clone() } else { a.clone() };
    coerce_to_common("IFNULL", chosen, a, b)
}

/// IF(cond, a, b): a when cond is true, b otherwise.
///
/// A NULL condition selects the false branch. A NULL in the selected
/// branch yields NULL.
pub fn if_function(args: &[FieldValue], _ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let cond = arg_bool("IF", args, 0)?.unwrap_or(false);
    let a = arg_value("IF", args, 1)?;
    let b = arg_value("IF", args, 2)?;

    let chosen = if cond { a.clone() } else { b.clone() };
    coerce_to_common("IF", chosen, a, b)
}

register_sql_function!(
    name: "ISNULL",
    aliases: [],
    category: FunctionCategory::Conditional,
    signature: FunctionSignature::fixed(&[ParamKind::Any], ReturnKind::Fixed(ValueKind::Integer))
        .non_strict(),
    description: "1 if the argument is NULL, otherwise 0",
    handler: isnull_function
);

register_sql_function!(
    name: "IFNULL",
    aliases: [],
    category: FunctionCategory::Conditional,
    signature: FunctionSignature::fixed(&[ParamKind::Any, ParamKind::Any], ReturnKind::Polymorphic)
        .non_strict()
        .with_volatility(Volatility::Stable),
    description: "First argument unless it is NULL, otherwise the second",
    handler: ifnull_function
);

register_sql_function!(
    name: "IF",
    aliases: [],
    category: FunctionCategory::Conditional,
    signature: FunctionSignature::fixed(
        &[ParamKind::Boolean, ParamKind::Any, ParamKind::Any],
        ReturnKind::Polymorphic
    )
    .non_strict()
    .with_volatility(Volatility::Stable),
    description: "Second argument when the condition is true, otherwise the third",
    handler: if_function
);
