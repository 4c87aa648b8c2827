/*!
# INET_ATON Tests
*/

use crate::unit::common::*;
use mysql_compat::{CompatConfig, FieldValue, OctetPolicy};

#[test]
fn test_inet_aton() {
    assert_eq!(eval("INET_ATON", &[text("192.168.1.1")]), int(3_232_235_777));
    assert_eq!(eval("INET_ATON", &[text("10.0.0.1")]), int(167_772_161));
    assert_eq!(eval("INET_ATON", &[text("0.0.0.0")]), int(0));
}

#[test]
fn test_inet_aton_rejects_malformed() {
    for bad in ["192.168.1", "192.168.1.1.1", "a.b.c.d", "1..2.3", "", "300.1.1.1"] {
        assert_eq!(eval("INET_ATON", &[text(bad)]), FieldValue::Null, "{}", bad);
    }
    assert_eq!(eval("INET_ATON", &[FieldValue::Null]), FieldValue::Null);
}

#[test]
fn test_inet_aton_unchecked_policy() {
    let config = CompatConfig {
        inet_octet_policy: OctetPolicy::Unchecked,
        ..CompatConfig::default()
    };
    assert_eq!(
        eval_with(config, "INET_ATON", &[text("0.0.1.256")]),
        int(512)
    );
}
