/*!
# Registry Tests

Lookup, dispatch contract and catalog output of the function table.
*/

use mysql_compat::catalog::{generate_catalog_json, generate_function_catalog};
use mysql_compat::sql::execution::expression::function_metadata::{
    HOST_BUILTIN_COLLISIONS, Volatility, all_function_names, find_function,
};
use mysql_compat::{BuiltinFunctions, FieldValue, FunctionContext, SqlError};

const EXPECTED: &[&str] = &[
    "ISNULL",
    "IFNULL",
    "IF",
    "CONCAT",
    "CONCAT_WS",
    "FIND_IN_SET",
    "FIELD",
    "ELT",
    "TRIM",
    "LTRIM",
    "RTRIM",
    "INSERT",
    "FORMAT",
    "DATE_FORMAT",
    "FROM_UNIXTIME",
    "UNIX_TIMESTAMP",
    "INET_ATON",
    "TIMESTAMPDIFF",
    "TIMESTAMPDIFF_MICROSECOND",
    "TIMESTAMPDIFF_SECOND",
    "TIMESTAMPDIFF_MINUTE",
    "TIMESTAMPDIFF_HOUR",
    "TIMESTAMPDIFF_DAY",
    "TIMESTAMPDIFF_WEEK",
    "TIMESTAMPDIFF_MONTH",
    "TIMESTAMPDIFF_YEAR",
];

#[test]
fn test_every_function_is_registered() {
    for name in EXPECTED {
        assert!(find_function(name).is_some(), "{} missing", name);
        assert!(find_function(&name.to_lowercase()).is_some(), "{} lowercase", name);
    }
    let names = all_function_names();
    assert!(names.contains(&"TIMEDIFF_HOUR"));
}

#[test]
fn test_host_builtin_overrides_are_marked() {
    for name in HOST_BUILTIN_COLLISIONS {
        let def = find_function(name).unwrap();
        assert!(def.overrides_host_builtin(), "{}", name);
    }
    assert!(!find_function("CONCAT_WS").unwrap().overrides_host_builtin());
}

#[test]
fn test_volatility() {
    assert_eq!(
        find_function("UNIX_TIMESTAMP").unwrap().signature.volatility,
        Volatility::Volatile
    );
    assert_eq!(
        find_function("FIND_IN_SET").unwrap().signature.volatility,
        Volatility::Immutable
    );
}

#[test]
fn test_dispatch_errors() {
    let ctx = FunctionContext::default();
    assert!(matches!(
        BuiltinFunctions::evaluate_function_by_name("NOPE", &[], &ctx),
        Err(SqlError::UnknownFunction { .. })
    ));
    assert!(matches!(
        BuiltinFunctions::evaluate_function_by_name(
            "INSERT",
            &[FieldValue::text("a"), FieldValue::Integer(1)],
            &ctx
        ),
        Err(SqlError::ArityMismatch { .. })
    ));
    assert!(matches!(
        BuiltinFunctions::evaluate_function_by_name(
            "FIND_IN_SET",
            &[FieldValue::Integer(1), FieldValue::text("1,2")],
            &ctx
        ),
        Err(SqlError::TypeError { .. })
    ));
}

#[test]
fn test_boolean_arguments_are_cast() {
    let ctx = FunctionContext::default();
    // BOOLEAN → INTEGER for ELT's selector
    assert_eq!(
        BuiltinFunctions::evaluate_function_by_name(
            "ELT",
            &[FieldValue::Boolean(true), FieldValue::text("a")],
            &ctx
        )
        .unwrap(),
        FieldValue::text("a")
    );
}

#[test]
fn test_catalog_lists_everything() {
    let markdown = generate_function_catalog();
    for name in EXPECTED {
        assert!(markdown.contains(name), "{} not in catalog", name);
    }

    let json: serde_json::Value = serde_json::from_str(&generate_catalog_json().unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), EXPECTED.len());
}
