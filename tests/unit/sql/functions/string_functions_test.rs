/*!
# String Function Tests

CONCAT, CONCAT_WS, FIND_IN_SET, FIELD, ELT, the TRIM family and INSERT.
*/

use crate::unit::common::*;
use mysql_compat::{CompatConfig, FieldValue, SqlError};

#[test]
fn test_concat() {
    assert_eq!(eval("CONCAT", &[text("x"), text("y"), text("z")]), text("xyz"));
    assert_eq!(eval("CONCAT", &[text("x"), FieldValue::Null]), FieldValue::Null);
    assert_eq!(
        eval("CONCAT", &[text("n="), int(42), text(" f="), FieldValue::Boolean(true)]),
        text("n=42 f=1")
    );
    assert_eq!(
        eval("CONCAT", &[ts("2024-03-05 14:30:00")]),
        text("2024-03-05 14:30:00")
    );
}

#[test]
fn test_concat_requires_an_argument() {
    assert!(matches!(
        try_eval("CONCAT", &[]),
        Err(SqlError::ArityMismatch { .. })
    ));
}

#[test]
fn test_concat_ws() {
    assert_eq!(
        eval("CONCAT_WS", &[text(","), text("x"), FieldValue::Null, text("y")]),
        text("x,y")
    );
    assert_eq!(
        eval("CONCAT_WS", &[text("-"), FieldValue::Null, text("a")]),
        text("a")
    );
    assert_eq!(
        eval("CONCAT_WS", &[text(","), FieldValue::Null, FieldValue::Null]),
        FieldValue::Null
    );
    assert_eq!(
        eval("CONCAT_WS", &[FieldValue::Null, text("a"), text("b")]),
        FieldValue::Null
    );
    assert_eq!(eval("CONCAT_WS", &[text(""), int(1), int(2)]), text("12"));
    // a separator with nothing to join
    assert_eq!(eval("CONCAT_WS", &[text(",")]), FieldValue::Null);
}

#[test]
fn test_find_in_set() {
    assert_eq!(eval("FIND_IN_SET", &[text("b"), text("a, b ,c")]), int(2));
    assert_eq!(eval("FIND_IN_SET", &[text("a"), text("a,b,c")]), int(1));
    assert_eq!(eval("FIND_IN_SET", &[text("d"), text("a,b,c")]), int(0));
    assert_eq!(eval("FIND_IN_SET", &[text("b"), text("")]), int(0));
    // empty tokens are not counted
    assert_eq!(eval("FIND_IN_SET", &[text("c"), text("a,,c")]), int(2));
    assert_eq!(
        eval("FIND_IN_SET", &[FieldValue::Null, text("a")]),
        FieldValue::Null
    );
}

#[test]
fn test_field() {
    assert_eq!(eval("FIELD", &[text("b"), text("a"), text("b"), text("c")]), int(2));
    assert_eq!(eval("FIELD", &[text("z"), text("a"), text("b")]), int(0));
    assert_eq!(
        eval("FIELD", &[text("b"), FieldValue::Null, text("b")]),
        int(2)
    );
    assert_eq!(eval("FIELD", &[FieldValue::Null, FieldValue::Null]), int(0));
    assert_eq!(eval("FIELD", &[int(3), dec("1.0"), dec("3.00")]), int(2));
}

#[test]
fn test_field_numbers_beyond_f64_precision() {
    let needle = int(9_007_199_254_740_993);
    assert_eq!(eval("FIELD", &[needle.clone(), dec("9007199254740992")]), int(0));
    assert_eq!(
        eval("FIELD", &[needle.clone(), FieldValue::Float(9_007_199_254_740_992.0)]),
        int(0)
    );
    assert_eq!(
        eval("FIELD", &[needle, dec("9007199254740992"), dec("9007199254740993")]),
        int(2)
    );
    assert_eq!(eval("FIELD", &[int(2), FieldValue::Float(2.0)]), int(1));
}

#[test]
fn test_elt() {
    assert_eq!(eval("ELT", &[int(2), text("a"), text("b"), text("c")]), text("b"));
    assert_eq!(eval("ELT", &[int(0), text("a"), text("b")]), FieldValue::Null);
    assert_eq!(eval("ELT", &[int(5), text("a"), text("b")]), FieldValue::Null);
    assert_eq!(eval("ELT", &[int(-1), text("a")]), FieldValue::Null);
    assert_eq!(eval("ELT", &[FieldValue::Null, text("a")]), FieldValue::Null);
    assert_eq!(
        eval("ELT", &[int(1), FieldValue::Null, text("b")]),
        FieldValue::Null
    );
}

#[test]
fn test_elt_rounds_fractional_selector() {
    assert_eq!(eval("ELT", &[dec("1.5"), text("a"), text("b")]), text("b"));
    assert_eq!(eval("ELT", &[dec("1.4"), text("a"), text("b")]), text("a"));
    assert_eq!(eval("ELT", &[FieldValue::Float(2.2), text("a"), text("b")]), text("b"));
    assert_eq!(eval("ELT", &[FieldValue::Float(0.4), text("a")]), FieldValue::Null);
    assert_eq!(eval("ELT", &[FieldValue::Float(f64::NAN), text("a")]), FieldValue::Null);
    assert!(try_eval("ELT", &[text("1"), text("a")]).is_err());
}

#[test]
fn test_trim_family() {
    assert_eq!(eval("TRIM", &[text("  hi  ")]), text("hi"));
    assert_eq!(eval("LTRIM", &[text(" \t hi ")]), text("hi "));
    assert_eq!(eval("RTRIM", &[text(" hi \r\n")]), text(" hi"));
    assert_eq!(eval("TRIM", &[text("xxhixx"), text("x")]), text("hi"));
    assert_eq!(eval("TRIM", &[FieldValue::Null]), FieldValue::Null);
    assert_eq!(eval("TRIM", &[text("   ")]), text(""));
}

#[test]
fn test_trim_is_idempotent() {
    for input in ["  a b  ", "\t\tx", "y\n\n", "", "plain"] {
        for name in ["TRIM", "LTRIM", "RTRIM"] {
            let once = eval(name, &[text(input)]);
            let twice = eval(name, &[once.clone()]);
            assert_eq!(once, twice, "{}({:?})", name, input);
        }
    }
}

#[test]
fn test_trim_default_chars_from_config() {
    let config = CompatConfig {
        default_trim_chars: "*".to_string(),
        ..CompatConfig::default()
    };
    assert_eq!(eval_with(config, "TRIM", &[text("** hi **")]), text(" hi "));
}

#[test]
fn test_insert() {
    assert_eq!(
        eval("INSERT", &[text("Hello World"), int(1), int(5), text("Goodbye")]),
        text("Goodbye World")
    );
    assert_eq!(
        eval("INSERT", &[text("Quadratic"), int(3), int(4), text("What")]),
        text("QuWhattic")
    );
}

#[test]
fn test_insert_bounds() {
    // pos beyond the string leaves it unchanged
    assert_eq!(
        eval("INSERT", &[text("Quadratic"), int(100), int(4), text("What")]),
        text("Quadratic")
    );
    assert_eq!(
        eval("INSERT", &[text("Quadratic"), int(-1), int(4), text("What")]),
        text("Quadratic")
    );
    // len past the end replaces the remainder
    assert_eq!(
        eval("INSERT", &[text("Quadratic"), int(3), int(100), text("What")]),
        text("QuWhat")
    );
    assert_eq!(
        eval("INSERT", &[text("abc"), int(2), int(-5), text("Z")]),
        text("aZ")
    );
    assert_eq!(
        eval("INSERT", &[text("abc"), FieldValue::Null, int(1), text("Z")]),
        FieldValue::Null
    );
}
