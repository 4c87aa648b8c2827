//! Function registry, dispatch and implementations.
//!
//! - [`function_metadata`] - signatures, the `register_sql_function!` macro and
//!   the immutable lookup table
//! - [`functions`] - the MySQL-dialect implementations
//! - [`catalog`] - markdown/JSON documentation of everything registered

pub mod catalog;
pub mod function_metadata;
pub mod functions;

// Re-export the main API
pub use function_metadata::{
    FunctionCategory, FunctionSignature, ParamKind, ReturnKind, SqlFunctionDef, Volatility,
    find_function, invoke_function,
};
pub use functions::BuiltinFunctions;
