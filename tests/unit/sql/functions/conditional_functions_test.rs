/*!
# Conditional Function Tests

ISNULL, IFNULL and IF, including NULL conditions and type promotion.
*/

use crate::unit::common::*;
use mysql_compat::{FieldValue, SqlError};

#[test]
fn test_isnull_never_returns_null() {
    assert_eq!(eval("ISNULL", &[FieldValue::Null]), int(1));
    for value in [int(0), text(""), FieldValue::Boolean(false), ts("2024-01-01")] {
        assert_eq!(eval("isnull", &[value]), int(0));
    }
}

#[test]
fn test_ifnull_law() {
    let samples = [FieldValue::Null, int(3), int(-1)];
    for a in &samples {
        for b in &samples {
            let expected = if a.is_null() { b.clone() } else { a.clone() };
            assert_eq!(eval("IFNULL", &[a.clone(), b.clone()]), expected);
        }
    }
    assert_eq!(eval("IFNULL", &[FieldValue::Null, text("b")]), text("b"));
    assert_eq!(eval("IFNULL", &[text("a"), text("b")]), text("a"));
}

#[test]
fn test_ifnull_common_type() {
    assert_eq!(eval("IFNULL", &[int(1), dec("2.5")]), dec("1"));
    assert_eq!(
        eval("IFNULL", &[FieldValue::Null, FieldValue::Boolean(true)]),
        FieldValue::Boolean(true)
    );
    assert!(matches!(
        try_eval("IFNULL", &[ts("2024-01-01"), int(1)]),
        Err(SqlError::TypeError { .. })
    ));
}

#[test]
fn test_if_selects_branch() {
    assert_eq!(
        eval("IF", &[FieldValue::Boolean(true), int(1), int(2)]),
        int(1)
    );
    assert_eq!(
        eval("IF", &[FieldValue::Boolean(false), int(1), int(2)]),
        int(2)
    );
    assert_eq!(eval("IF", &[int(0), text("a"), text("b")]), text("b"));
}

#[test]
fn test_if_null_condition_takes_false_branch() {
    assert_eq!(eval("IF", &[FieldValue::Null, int(1), int(2)]), int(2));
    assert_eq!(
        eval("IF", &[FieldValue::Null, int(1), FieldValue::Null]),
        FieldValue::Null
    );
}

#[test]
fn test_if_rejects_text_condition() {
    assert!(matches!(
        try_eval("IF", &[text("yes"), int(1), int(2)]),
        Err(SqlError::TypeError { .. })
    ));
}

#[test]
fn test_arity_errors() {
    assert!(matches!(
        try_eval("IFNULL", &[int(1)]),
        Err(SqlError::ArityMismatch { .. })
    ));
    assert!(matches!(
        try_eval("ISNULL", &[]),
        Err(SqlError::ArityMismatch { .. })
    ));
}
