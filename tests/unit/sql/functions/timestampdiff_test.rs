/*!
# TIMESTAMPDIFF Tests

The text-unit form and the per-unit TIMESTAMPDIFF_<UNIT> / TIMEDIFF_<UNIT>
registrations share one implementation.
*/

use crate::unit::common::*;
use mysql_compat::{FieldValue, SqlError};

#[test]
fn test_month_counts_complete_months() {
    assert_eq!(
        eval("TIMESTAMPDIFF_MONTH", &[ts("2024-01-31"), ts("2024-03-01")]),
        int(1)
    );
    assert_eq!(
        eval("TIMESTAMPDIFF_MONTH", &[ts("2024-01-01"), ts("2024-03-01")]),
        int(2)
    );
    assert_eq!(
        eval("timediff_month", &[ts("2024-03-01"), ts("2024-01-31")]),
        int(-1)
    );
}

#[test]
fn test_year() {
    assert_eq!(
        eval("TIMESTAMPDIFF_YEAR", &[ts("2000-02-29"), ts("2024-02-29")]),
        int(24)
    );
    assert_eq!(
        eval("TIMESTAMPDIFF_YEAR", &[ts("2024-12-31"), ts("2025-01-01")]),
        int(0)
    );
}

#[test]
fn test_fixed_units() {
    let start = ts("2024-01-01 00:00:00");
    let end = ts("2024-01-15 12:30:45.5");
    let cases = [
        ("TIMESTAMPDIFF_MICROSECOND", 1_254_645_500_000),
        ("TIMESTAMPDIFF_SECOND", 1_254_645),
        ("TIMESTAMPDIFF_MINUTE", 20_910),
        ("TIMESTAMPDIFF_HOUR", 348),
        ("TIMESTAMPDIFF_DAY", 14),
        ("TIMESTAMPDIFF_WEEK", 2),
    ];
    for (name, expected) in cases {
        assert_eq!(eval(name, &[start.clone(), end.clone()]), int(expected), "{}", name);
        assert_eq!(eval(name, &[end.clone(), start.clone()]), int(-expected), "{}", name);
    }
}

#[test]
fn test_text_unit_form() {
    let start = ts("2024-01-01");
    let end = ts("2024-03-15");
    assert_eq!(eval("TIMESTAMPDIFF", &[text("MONTH"), start.clone(), end.clone()]), int(2));
    assert_eq!(eval("TIMESTAMPDIFF", &[text("day"), start.clone(), end.clone()]), int(74));
    assert_eq!(
        eval("TIMESTAMPDIFF", &[text("SQL_TSI_WEEK"), start.clone(), end.clone()]),
        int(10)
    );
    assert!(matches!(
        try_eval("TIMESTAMPDIFF", &[text("decade"), start, end]),
        Err(SqlError::ExecutionError { .. })
    ));
}

#[test]
fn test_null_timestamps() {
    assert_eq!(
        eval("TIMESTAMPDIFF_DAY", &[FieldValue::Null, ts("2024-01-01")]),
        FieldValue::Null
    );
    assert_eq!(
        eval("TIMESTAMPDIFF", &[FieldValue::Null, ts("2024-01-01"), ts("2024-01-02")]),
        FieldValue::Null
    );
}

#[test]
fn test_rejects_non_timestamps() {
    assert!(matches!(
        try_eval("TIMESTAMPDIFF_DAY", &[text("2024-01-01"), ts("2024-01-02")]),
        Err(SqlError::TypeError { .. })
    ));
}
