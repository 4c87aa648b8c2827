//! # mysql-compat
//!
//! MySQL-dialect scalar functions for SQL engines that speak a different
//! dialect. Every function is a pure mapping from already-evaluated
//! [`FieldValue`] arguments to a result, looked up by name in a table that is
//! built once and never mutated.
//!
//! ## Quick Start
//!
//! ```rust
//! use mysql_compat::{FieldValue, FunctionContext, invoke_function};
//!
//! let ctx = FunctionContext::default();
//! let result = invoke_function(
//!     "concat_ws",
//!     &[FieldValue::text(","), FieldValue::text("x"), FieldValue::Null, FieldValue::text("y")],
//!     &ctx,
//! )?;
//! assert_eq!(result, FieldValue::text("x,y"));
//! # Ok::<(), mysql_compat::SqlError>(())
//! ```
//!
//! ## Configuration
//!
//! Session settings (time zone, INET_ATON octet policy, FORMAT precision cap,
//! default TRIM characters) live in [`CompatConfig`] and reach every call
//! through the read-only [`FunctionContext`].

pub mod sql;

pub use sql::config::{CompatConfig, OctetPolicy, PropertyResolver};
pub use sql::error::{SqlError, SqlResult};
pub use sql::execution::expression::catalog;
pub use sql::execution::{
    BuiltinFunctions, Clock, FieldValue, FixedClock, FunctionContext, SystemClock, ValueKind,
    invoke_function,
};
