// MySQL-dialect scalar functions for engines that speak another SQL dialect

pub mod config;
pub mod error;
pub mod execution;

// Re-export main API
pub use config::{CompatConfig, OctetPolicy};
pub use error::{SqlError, SqlResult};
pub use execution::{BuiltinFunctions, FieldValue, FunctionContext, invoke_function};

// Version and feature info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FEATURES: &[&str] = &[
    "null_functions",     // ISNULL, IFNULL, IF
    "string_functions",   // CONCAT, CONCAT_WS, FIND_IN_SET, FIELD, ELT, TRIM, LTRIM, RTRIM, INSERT
    "format_functions",   // FORMAT
    "date_functions",     // DATE_FORMAT, FROM_UNIXTIME, UNIX_TIMESTAMP
    "time_functions",     // TIMESTAMPDIFF and TIMESTAMPDIFF_<UNIT>
    "network_functions",  // INET_ATON
    "implicit_bool_casts",
];
