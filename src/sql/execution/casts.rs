//! Implicit conversions between scalar kinds.
//!
//! The dialect treats booleans as integers and lets numeric values stand in
//! for conditions, so the dispatch layer applies these casts before a
//! function body runs:
//!
//! | From                     | To                         | Rule            |
//! |--------------------------|----------------------------|-----------------|
//! | BOOLEAN                  | INTEGER / DECIMAL / FLOAT  | true → 1, false → 0 |
//! | INTEGER / DECIMAL / FLOAT | BOOLEAN                   | non-zero → true |
//! | INTEGER                  | DECIMAL / FLOAT            | widening        |
//! | DECIMAL                  | FLOAT                      | widening        |
//!
//! Text is never implicitly converted.

use super::types::{FieldValue, ValueKind};
use crate::sql::error::{SqlError, SqlResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Convert `value` to `target` if an implicit cast exists.
///
/// NULL converts to NULL for every target. Returns `None` when the
/// conversion is not implicit.
pub fn implicit_cast(value: &FieldValue, target: ValueKind) -> Option<FieldValue> {
    if value.kind() == target {
        return Some(value.clone());
    }
    match (value, target) {
        (FieldValue::Null, _) => Some(FieldValue::Null),

        (FieldValue::Boolean(b), ValueKind::Integer) => Some(FieldValue::Integer(i64::from(*b))),
        (FieldValue::Boolean(b), ValueKind::Decimal) => {
            Some(FieldValue::Decimal(Decimal::from(i64::from(*b))))
        }
        (FieldValue::Boolean(b), ValueKind::Float) => {
            Some(FieldValue::Float(if *b { 1.0 } else { 0.0 }))
        }

        (FieldValue::Integer(i), ValueKind::Boolean) => Some(FieldValue::Boolean(*i != 0)),
        (FieldValue::Float(f), ValueKind::Boolean) => Some(FieldValue::Boolean(*f != 0.0)),
        (FieldValue::Decimal(d), ValueKind::Boolean) => Some(FieldValue::Boolean(!d.is_zero())),

        (FieldValue::Integer(i), ValueKind::Decimal) => Some(FieldValue::Decimal(Decimal::from(*i))),
        (FieldValue::Integer(i), ValueKind::Float) => Some(FieldValue::Float(*i as f64)),
        (FieldValue::Decimal(d), ValueKind::Float) => d.to_f64().map(FieldValue::Float),

        _ => None,
    }
}

/// Common kind two argument kinds promote to, if any.
///
/// NULL adopts the other kind, BOOLEAN adopts a numeric partner, and
/// numerics widen INTEGER → DECIMAL → FLOAT.
pub fn common_kind(left: ValueKind, right: ValueKind) -> Option<ValueKind> {
    match (left, right) {
        (l, r) if l == r => Some(l),
        (ValueKind::Null, other) | (other, ValueKind::Null) => Some(other),
        (ValueKind::Boolean, n) | (n, ValueKind::Boolean) if n.is_numeric() => Some(n),
        (l, r) if l.is_numeric() && r.is_numeric() => Some(l.max(r)),
        _ => None,
    }
}

/// Promote `chosen` to the common kind of a polymorphic pair.
///
/// Used by IFNULL and IF, whose result type is the common type of the two
/// candidate values regardless of which one is returned.
pub fn coerce_to_common(
    function: &str,
    chosen: FieldValue,
    left: &FieldValue,
    right: &FieldValue,
) -> SqlResult<FieldValue> {
    let target = common_kind(left.kind(), right.kind()).ok_or_else(|| {
        SqlError::type_error(
            function,
            format!("arguments of a common type, {} found", left.type_name()),
            right.type_name(),
        )
    })?;
    if chosen.is_null() || target == ValueKind::Null {
        return Ok(chosen);
    }
    implicit_cast(&chosen, target).ok_or_else(|| {
        SqlError::type_error(function, target.name(), chosen.type_name())
    })
}
