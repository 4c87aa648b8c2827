//! Function Metadata and Self-Registration System
//!
//! SQL functions declare their signature next to their implementation with
//! [`register_sql_function!`](crate::register_sql_function). Definitions are
//! collected at link time through `inventory` and folded into one
//! immutable lookup table the first time any function is resolved. The
//! table is never mutated afterwards.

use crate::sql::error::{SqlError, SqlResult};
use crate::sql::execution::casts::implicit_cast;
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::types::{FieldValue, ValueKind};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Function handler signature
///
/// Handlers receive arguments that already passed arity and kind checks
/// (see [`SqlFunctionDef::invoke`]).
pub type FunctionHandler = fn(&[FieldValue], &FunctionContext) -> Result<FieldValue, SqlError>;

/// Names the host engine already defines; registering these shadows the
/// host's own semantics.
pub const HOST_BUILTIN_COLLISIONS: &[&str] = &["CONCAT", "LTRIM", "RTRIM", "TRIM"];

/// Categories of SQL functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FunctionCategory {
    /// NULL handling and branching (ISNULL, IFNULL, IF)
    Conditional,
    /// String manipulation (CONCAT, TRIM, INSERT, FIELD, ...)
    String,
    /// Number formatting (FORMAT)
    Math,
    /// Date/time formatting and arithmetic (DATE_FORMAT, TIMESTAMPDIFF, ...)
    DateTime,
    /// Network address conversion (INET_ATON)
    Network,
}

/// Accepted kind of one parameter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamKind {
    /// Any value, passed through untouched
    Any,
    Boolean,
    Integer,
    /// INTEGER, DECIMAL or FLOAT (BOOLEAN is cast to INTEGER)
    Numeric,
    Text,
    Timestamp,
}

impl ParamKind {
    /// Apply the implicit cast this parameter needs, if one exists.
    pub fn coerce(&self, value: &FieldValue) -> Option<FieldValue> {
        match self {
            ParamKind::Any => Some(value.clone()),
            ParamKind::Boolean => implicit_cast(value, ValueKind::Boolean),
            ParamKind::Integer => implicit_cast(value, ValueKind::Integer),
            ParamKind::Numeric => match value {
                FieldValue::Boolean(_) => implicit_cast(value, ValueKind::Integer),
                v if v.is_null() || v.is_numeric() => Some(v.clone()),
                _ => None,
            },
            ParamKind::Text => match value {
                FieldValue::Null | FieldValue::String(_) => Some(value.clone()),
                _ => None,
            },
            ParamKind::Timestamp => match value {
                FieldValue::Null | FieldValue::Timestamp(_) => Some(value.clone()),
                _ => None,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Any => "ANY",
            ParamKind::Boolean => "BOOLEAN",
            ParamKind::Integer => "INTEGER",
            ParamKind::Numeric => "NUMERIC",
            ParamKind::Text => "TEXT",
            ParamKind::Timestamp => "TIMESTAMP",
        }
    }
}

/// Result kind of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnKind {
    Fixed(ValueKind),
    /// Common type of the polymorphic arguments (IFNULL, IF, ELT)
    Polymorphic,
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnKind::Fixed(kind) => write!(f, "{}", kind),
            ReturnKind::Polymorphic => f.write_str("ANY"),
        }
    }
}

/// Whether a result may change between calls with identical arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Volatility {
    /// Depends only on the arguments
    Immutable,
    /// Depends on the arguments and on session configuration
    Stable,
    /// Reads the clock
    Volatile,
}

/// Call contract of a registered function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    /// Kinds of the leading, positionally typed parameters
    pub params: &'static [ParamKind],
    /// Kind of every argument past `params`, when the function is variadic
    pub variadic: Option<ParamKind>,
    pub min_args: usize,
    /// `None` means unbounded
    pub max_args: Option<usize>,
    pub returns: ReturnKind,
    /// A strict function yields NULL without running when any argument is NULL
    pub strict: bool,
    pub volatility: Volatility,
}

impl FunctionSignature {
    /// Fixed arity: exactly `params.len()` arguments
    pub const fn fixed(params: &'static [ParamKind], returns: ReturnKind) -> Self {
        Self {
            params,
            variadic: None,
            min_args: params.len(),
            max_args: Some(params.len()),
            returns,
            strict: true,
            volatility: Volatility::Immutable,
        }
    }

    /// Trailing parameters past `min_args` are optional
    pub const fn optional(
        params: &'static [ParamKind],
        min_args: usize,
        returns: ReturnKind,
    ) -> Self {
        Self {
            params,
            variadic: None,
            min_args,
            max_args: Some(params.len()),
            returns,
            strict: true,
            volatility: Volatility::Immutable,
        }
    }

    /// Leading `params`, then any number of `tail` arguments
    pub const fn variadic(
        params: &'static [ParamKind],
        tail: ParamKind,
        min_args: usize,
        returns: ReturnKind,
    ) -> Self {
        Self {
            params,
            variadic: Some(tail),
            min_args,
            max_args: None,
            returns,
            strict: true,
            volatility: Volatility::Immutable,
        }
    }

    /// Let the body see NULL arguments
    pub const fn non_strict(mut self) -> Self {
        self.strict = false;
        self
    }

    pub const fn with_volatility(mut self, volatility: Volatility) -> Self {
        self.volatility = volatility;
        self
    }

    /// Human readable arity ("2", "1 to 2", "at least 1")
    pub fn arity_description(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{} to {}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        }
    }

    /// Kind required at argument position `index`
    pub fn param_kind(&self, index: usize) -> Option<ParamKind> {
        self.params.get(index).copied().or(self.variadic)
    }

    pub fn check_arity(&self, function: &str, actual: usize) -> SqlResult<()> {
        let within_max = self.max_args.is_none_or(|max| actual <= max);
        if actual < self.min_args || !within_max {
            return Err(SqlError::arity_error(
                function,
                self.arity_description(),
                actual,
            ));
        }
        Ok(())
    }

    /// Apply implicit casts to every argument, rejecting kinds that have none.
    pub fn coerce_args(&self, function: &str, args: &[FieldValue]) -> SqlResult<Vec<FieldValue>> {
        args.iter()
            .enumerate()
            .map(|(index, arg)| {
                let kind = self.param_kind(index).unwrap_or(ParamKind::Any);
                kind.coerce(arg).ok_or_else(|| {
                    SqlError::type_error(
                        function,
                        format!("{} for argument {}", kind.name(), index + 1),
                        arg.type_name(),
                    )
                })
            })
            .collect()
    }
}

/// SQL Function metadata for self-registration
#[derive(Debug, Clone)]
pub struct SqlFunctionDef {
    /// Primary function name (uppercase)
    pub name: &'static str,
    /// Alternative names/aliases for the function
    pub aliases: &'static [&'static str],
    pub category: FunctionCategory,
    pub signature: FunctionSignature,
    /// One-line summary for the catalog
    pub description: &'static str,
    /// Function implementation handler
    pub handler: FunctionHandler,
}

impl SqlFunctionDef {
    /// Check the call contract, apply implicit casts, honour strictness and
    /// run the handler.
    pub fn invoke(&self, args: &[FieldValue], ctx: &FunctionContext) -> SqlResult<FieldValue> {
        self.signature.check_arity(self.name, args.len())?;
        let args = self.signature.coerce_args(self.name, args)?;

        if self.signature.strict && args.iter().any(FieldValue::is_null) {
            return Ok(FieldValue::Null);
        }

        (self.handler)(&args, ctx)
    }

    /// True when the name shadows one of the host engine's own functions
    pub fn overrides_host_builtin(&self) -> bool {
        HOST_BUILTIN_COLLISIONS.contains(&self.name)
    }
}

// Distributed registration storage for SQL functions
inventory::collect!(SqlFunctionDef);

/// Cached function lookup table.
///
/// Maps uppercase function names (including aliases) to their definitions.
/// Built once on first access and read-only afterwards.
static FUNCTION_LOOKUP_CACHE: LazyLock<HashMap<String, &'static SqlFunctionDef>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();

        for func_def in inventory::iter::<SqlFunctionDef> {
            for name in std::iter::once(&func_def.name).chain(func_def.aliases.iter()) {
                if let Some(previous) = map.insert(name.to_uppercase(), func_def) {
                    log::warn!(
                        "Function name {} registered by both {} and {}; keeping {}",
                        name,
                        previous.name,
                        func_def.name,
                        func_def.name
                    );
                }
            }
        }

        log::debug!("Function table initialised with {} names", map.len());
        map
    });

/// Macro to register a SQL function with metadata
///
/// # Example
/// ```rust,ignore
/// register_sql_function!(
///     name: "ISNULL",
///     aliases: [],
///     category: FunctionCategory::Conditional,
///     signature: FunctionSignature::fixed(&[ParamKind::Any], ReturnKind::Fixed(ValueKind::Integer))
///         .non_strict(),
///     description: "1 if the argument is NULL, else 0",
///     handler: isnull_function
/// );
/// ```
#[macro_export]
macro_rules! register_sql_function {
    (
        name: $name:expr,
        aliases: [$($alias:expr),*],
        category: $category:expr,
        signature: $signature:expr,
        description: $description:expr,
        handler: $handler:expr
    ) => {
        inventory::submit! {
            $crate::sql::execution::expression::function_metadata::SqlFunctionDef {
                name: $name,
                aliases: &[$($alias),*],
                category: $category,
                signature: $signature,
                description: $description,
                handler: $handler,
            }
        }
    };
}

/// Get all registered SQL functions
pub fn all_registered_functions() -> impl Iterator<Item = &'static SqlFunctionDef> {
    inventory::iter::<SqlFunctionDef>.into_iter()
}

/// Find a function by name or alias (case-insensitive).
pub fn find_function(name: &str) -> Option<&'static SqlFunctionDef> {
    FUNCTION_LOOKUP_CACHE.get(&name.to_uppercase()).copied()
}

/// Get all functions in a specific category, sorted by name
pub fn functions_in_category(category: FunctionCategory) -> Vec<&'static SqlFunctionDef> {
    let mut funcs: Vec<_> = all_registered_functions()
        .filter(|f| f.category == category)
        .collect();
    funcs.sort_by_key(|f| f.name);
    funcs
}

/// Every resolvable name (primary names and aliases), sorted
pub fn all_function_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = all_registered_functions()
        .flat_map(|f| std::iter::once(f.name).chain(f.aliases.iter().copied()))
        .collect();
    names.sort_unstable();
    names
}

/// Resolve `name` and evaluate it over `args`.
pub fn invoke_function(
    name: &str,
    args: &[FieldValue],
    ctx: &FunctionContext,
) -> SqlResult<FieldValue> {
    let func_def = find_function(name).ok_or_else(|| SqlError::unknown_function_error(name))?;
    func_def.invoke(args, ctx)
}
