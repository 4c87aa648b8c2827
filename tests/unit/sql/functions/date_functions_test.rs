/*!
# Date Function Tests

DATE_FORMAT, FROM_UNIXTIME and UNIX_TIMESTAMP.
*/

use crate::unit::common::*;
use chrono::{FixedOffset, TimeZone, Utc};
use mysql_compat::{CompatConfig, FieldValue, FunctionContext, invoke_function};

#[test]
fn test_date_format_identity() {
    let value = ts("2024-03-05 14:30:00");
    assert_eq!(
        eval("DATE_FORMAT", &[value, text("%Y-%m-%d %H:%i:%s")]),
        text("2024-03-05 14:30:00")
    );
}

#[test]
fn test_date_format_directives() {
    let value = ts("2009-07-04 09:05:03");
    assert_eq!(
        eval("DATE_FORMAT", &[value.clone(), text("%W %c/%d/%y %h:%i %p")]),
        text("Saturday 7/04/09 09:05 AM")
    );
    assert_eq!(
        eval("DATE_FORMAT", &[value.clone(), text("100%% at %H")]),
        text("100% at 09")
    );
    assert_eq!(eval("DATE_FORMAT", &[value, text("%x%")]), text("x%"));
}

#[test]
fn test_date_format_null() {
    assert_eq!(
        eval("DATE_FORMAT", &[FieldValue::Null, text("%Y")]),
        FieldValue::Null
    );
    assert_eq!(
        eval("DATE_FORMAT", &[ts("2024-01-01"), FieldValue::Null]),
        FieldValue::Null
    );
}

#[test]
fn test_date_format_uses_session_time_zone() {
    let config = CompatConfig {
        session_time_zone: FixedOffset::west_opt(5 * 3600).unwrap(),
        ..CompatConfig::default()
    };
    assert_eq!(
        eval_with(config, "DATE_FORMAT", &[ts("2024-01-01 03:00:00"), text("%Y-%m-%d %H")]),
        text("2023-12-31 22")
    );
}

#[test]
fn test_from_unixtime() {
    assert_eq!(eval("FROM_UNIXTIME", &[int(0)]), ts("1970-01-01 00:00:00"));
    assert_eq!(
        eval("FROM_UNIXTIME", &[int(946_684_800)]),
        ts("2000-01-01 00:00:00")
    );
    assert_eq!(
        eval("FROM_UNIXTIME", &[int(-86_400)]),
        ts("1969-12-31 00:00:00")
    );
    assert_eq!(eval("FROM_UNIXTIME", &[int(i64::MAX)]), FieldValue::Null);
    assert_eq!(eval("FROM_UNIXTIME", &[FieldValue::Null]), FieldValue::Null);
}

#[test]
fn test_unix_timestamp_round_trip() {
    for t in [0, 1, -1, 1_709_649_000, -2_000_000_000, 4_102_444_800] {
        let instant = eval("FROM_UNIXTIME", &[int(t)]);
        assert_eq!(eval("UNIX_TIMESTAMP", &[instant]), int(t), "t = {}", t);
    }
}

#[test]
fn test_unix_timestamp_floors() {
    assert_eq!(
        eval("UNIX_TIMESTAMP", &[ts("1970-01-01 00:00:01.9")]),
        int(1)
    );
    assert_eq!(
        eval("UNIX_TIMESTAMP", &[ts("1969-12-31 23:59:59.5")]),
        int(-1)
    );
}

#[test]
fn test_unix_timestamp_reads_context_clock() {
    let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
    let ctx = FunctionContext::default().with_fixed_time(now);
    assert_eq!(
        invoke_function("UNIX_TIMESTAMP", &[], &ctx).unwrap(),
        int(now.timestamp())
    );
    assert_eq!(
        invoke_function("UNIX_TIMESTAMP", &[FieldValue::Null], &ctx).unwrap(),
        FieldValue::Null
    );
}
