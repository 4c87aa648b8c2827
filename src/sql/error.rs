/*!
# SQL Function Error Handling

Errors raised by the function library and its dispatch layer.

Malformed input inside a function body is *not* an error: lookup and
conversion functions answer with NULL or a sentinel instead (see
`INET_ATON`, `FIND_IN_SET`, `ELT`). A `SqlError` is reserved for contract
violations that the dispatch layer detects before a body runs, and for
invalid configuration.

## Error Categories

- **Unknown Function**: name not present in the function table
- **Arity Errors**: wrong number of arguments for the signature
- **Type Errors**: argument kind that no implicit cast can satisfy
- **Execution Errors**: runtime failures inside a function body
- **Config Errors**: unparseable configuration values

## Examples

```rust
use mysql_compat::sql::error::SqlError;

let error = SqlError::arity_error("ELT", "at least 2", 1);
assert_eq!(
    error.to_string(),
    "Function ELT expects at least 2 argument(s), got 1"
);
```
*/

use thiserror::Error;

/// Error type for function lookup, dispatch and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// The requested function is not registered.
    #[error("Unknown function: {name}")]
    UnknownFunction {
        /// Name as supplied by the caller
        name: String,
    },

    /// Argument count outside the function's declared arity.
    #[error("Function {function} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        /// Registered function name
        function: String,
        /// Human readable arity description ("2", "1 to 2", "at least 1")
        expected: String,
        /// Number of arguments supplied
        actual: usize,
    },

    /// Argument kind that cannot be implicitly cast to the parameter kind.
    #[error("Type error in {function}: expected {expected}, got {actual}")]
    TypeError {
        /// Function whose contract was violated
        function: String,
        /// Expected kind
        expected: String,
        /// Kind actually supplied
        actual: String,
    },

    /// Runtime failure while evaluating a function.
    #[error("Execution error in {function}: {message}")]
    ExecutionError {
        /// Function being evaluated
        function: String,
        /// Description of the failure
        message: String,
    },

    /// Invalid configuration value.
    #[error("Configuration error for '{key}': {message}")]
    ConfigError {
        /// Property or environment key
        key: String,
        /// Description of the problem
        message: String,
    },
}

impl SqlError {
    /// Create an unknown function error
    pub fn unknown_function_error(name: impl Into<String>) -> Self {
        SqlError::UnknownFunction { name: name.into() }
    }

    /// Create an arity error
    pub fn arity_error(function: impl Into<String>, expected: impl Into<String>, actual: usize) -> Self {
        SqlError::ArityMismatch {
            function: function.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a type error
    pub fn type_error(
        function: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        SqlError::TypeError {
            function: function.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an execution error
    pub fn execution_error(function: impl Into<String>, message: impl Into<String>) -> Self {
        SqlError::ExecutionError {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(key: impl Into<String>, message: impl Into<String>) -> Self {
        SqlError::ConfigError {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for SQL function operations
pub type SqlResult<T> = Result<T, SqlError>;
