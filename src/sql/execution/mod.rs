//! Value model and evaluation of MySQL-dialect functions.

pub mod casts;
pub mod context;
pub mod expression;
pub mod types;

pub use context::{Clock, FixedClock, FunctionContext, SystemClock};
pub use expression::{BuiltinFunctions, invoke_function};
pub use types::{FieldValue, ValueKind};
