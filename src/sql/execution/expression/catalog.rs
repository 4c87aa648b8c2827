//! SQL Function Catalog Generation
//!
//! Documentation and introspection for every registered function, as a
//! markdown page or as JSON for tooling.

use super::function_metadata::{
    FunctionCategory, FunctionSignature, ReturnKind, SqlFunctionDef, Volatility,
    all_registered_functions, find_function, functions_in_category,
};
use crate::sql::error::{SqlError, SqlResult};
use serde::Serialize;

const CATEGORIES: [(FunctionCategory, &str); 5] = [
    (FunctionCategory::Conditional, "Conditional Functions"),
    (FunctionCategory::String, "String Functions"),
    (FunctionCategory::Math, "Math Functions"),
    (FunctionCategory::DateTime, "Date/Time Functions"),
    (FunctionCategory::Network, "Network Functions"),
];

/// One function as exported by [`generate_catalog_json`]
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: FunctionCategory,
    pub arity: String,
    pub signature: FunctionSignature,
    pub description: &'static str,
    pub overrides_host_builtin: bool,
}

impl From<&SqlFunctionDef> for CatalogEntry {
    fn from(def: &SqlFunctionDef) -> Self {
        Self {
            name: def.name,
            aliases: def.aliases,
            category: def.category,
            arity: def.signature.arity_description(),
            signature: def.signature,
            description: def.description,
            overrides_host_builtin: def.overrides_host_builtin(),
        }
    }
}

/// Generates a markdown documentation catalog of all registered SQL functions.
///
/// # Example
///
/// ```rust,ignore
/// use mysql_compat::sql::execution::expression::catalog::generate_function_catalog;
/// let markdown = generate_function_catalog();
/// std::fs::write("docs/FUNCTION_CATALOG.md", markdown).unwrap();
/// ```
pub fn generate_function_catalog() -> String {
    let mut output = String::new();

    output.push_str("# MySQL Compatibility Function Catalog\n\n");
    output.push_str("Auto-generated catalog of all available SQL functions.\n\n");
    output.push_str("## Table of Contents\n\n");

    for (_, title) in &CATEGORIES {
        let anchor = title.to_lowercase().replace(' ', "-").replace('/', "");
        output.push_str(&format!("- [{}](#{})\n", title, anchor));
    }
    output.push_str("\n---\n\n");

    for (category, title) in &CATEGORIES {
        let funcs = functions_in_category(*category);
        if funcs.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", title));
        output.push_str(
            "| Function | Aliases | Parameters | Returns | Strict | Volatility | Description |\n",
        );
        output.push_str(
            "|----------|---------|------------|---------|--------|------------|-------------|\n",
        );

        for func in funcs {
            let name = if func.overrides_host_builtin() {
                format!("{} ⚠", func.name)
            } else {
                func.name.to_string()
            };
            let aliases = if func.aliases.is_empty() {
                "-".to_string()
            } else {
                func.aliases.join(", ")
            };
            let strict = if func.signature.strict { "✓" } else { "-" };
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                name,
                aliases,
                parameter_list(&func.signature),
                return_label(func.signature.returns),
                strict,
                volatility_label(func.signature.volatility),
                func.description
            ));
        }
        output.push('\n');
    }

    let total = all_registered_functions().count();
    let overrides = all_registered_functions()
        .filter(|f| f.overrides_host_builtin())
        .count();

    output.push_str("---\n\n");
    output.push_str("## Summary\n\n");
    output.push_str(&format!("- **Total Functions**: {}\n", total));
    output.push_str(&format!(
        "- **Host Built-in Overrides** (⚠): {}\n",
        overrides
    ));

    output
}

/// Every registered function as a pretty-printed JSON array, sorted by name.
pub fn generate_catalog_json() -> SqlResult<String> {
    let mut entries: Vec<CatalogEntry> = all_registered_functions().map(CatalogEntry::from).collect();
    entries.sort_by_key(|e| e.name);

    serde_json::to_string_pretty(&entries)
        .map_err(|e| SqlError::execution_error("CATALOG", format!("JSON export failed: {}", e)))
}

/// Parameter kinds as `TEXT, INTEGER [, TEXT]` or `TEXT, ANY...`
pub fn parameter_list(sig: &FunctionSignature) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(sig.params.len() + 1);
    for (index, kind) in sig.params.iter().enumerate() {
        if index >= sig.min_args {
            parts.push(format!("[{}]", kind.name()));
        } else {
            parts.push(kind.name().to_string());
        }
    }
    if let Some(tail) = sig.variadic {
        parts.push(format!("{}...", tail.name()));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

fn return_label(returns: ReturnKind) -> String {
    returns.to_string()
}

fn volatility_label(volatility: Volatility) -> &'static str {
    match volatility {
        Volatility::Immutable => "immutable",
        Volatility::Stable => "stable",
        Volatility::Volatile => "volatile",
    }
}

/// Returns functions whose name starts with `prefix` (case-insensitive).
pub fn find_functions_by_prefix(prefix: &str) -> Vec<&'static SqlFunctionDef> {
    let prefix_upper = prefix.to_uppercase();
    all_registered_functions()
        .filter(|f| f.name.starts_with(&prefix_upper))
        .collect()
}

/// Returns a summary of function counts by category.
pub fn function_count_by_category() -> Vec<(FunctionCategory, usize)> {
    CATEGORIES
        .iter()
        .map(|&(cat, _)| (cat, functions_in_category(cat).len()))
        .collect()
}

/// Check if a function name is valid (exists in registry, case-insensitive).
pub fn is_valid_function(name: &str) -> bool {
    find_function(name).is_some()
}

/// Get the category of a function (case-insensitive).
pub fn get_function_category(name: &str) -> Option<FunctionCategory> {
    find_function(name).map(|f| f.category)
}
