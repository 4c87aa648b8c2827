//! Property Resolution with Environment Variable Support
//!
//! Provides a `PropertyResolver` for resolving configuration properties with
//! a consistent precedence chain: ENV_VAR → config property → default.
//!
//! ## Usage
//!
//! ```rust
//! use mysql_compat::sql::config::resolver::PropertyResolver;
//! use std::collections::HashMap;
//!
//! let resolver = PropertyResolver::new("MYSQL_COMPAT_");
//! let props: HashMap<String, String> = HashMap::new();
//!
//! // Resolves: MYSQL_COMPAT_FORMAT_MAX_DECIMALS → props["format.max_decimals"] → default
//! let max_decimals: u32 = resolver.resolve(
//!     "FORMAT_MAX_DECIMALS",
//!     &["format.max_decimals"],
//!     &props,
//!     30,
//! );
//! assert_eq!(max_decimals, 30);
//! ```

use std::collections::HashMap;
use std::str::FromStr;

/// Environment variable prefix used by [`default_resolver`]
pub const DEFAULT_ENV_PREFIX: &str = "MYSQL_COMPAT_";

/// Type-safe property resolution with environment variable support.
///
/// Resolution chain (highest to lowest priority):
/// 1. Environment variable: `{prefix}{env_key}`
/// 2. Property from the props map (tries each key in order)
/// 3. Default value
#[derive(Debug, Clone)]
pub struct PropertyResolver {
    prefix: String,
}

impl Default for PropertyResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_PREFIX)
    }
}

impl PropertyResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Resolve a property value with type conversion.
    ///
    /// Values that fail to parse are skipped and resolution continues down
    /// the chain.
    pub fn resolve<T: FromStr>(
        &self,
        env_key: &str,
        prop_keys: &[&str],
        props: &HashMap<String, String>,
        default: T,
    ) -> T {
        self.resolve_optional(env_key, prop_keys, props)
            .unwrap_or_else(|| {
                log::debug!(
                    "PropertyResolver: {} using default value",
                    self.env_var_name(env_key)
                );
                default
            })
    }

    /// Resolve an optional property (returns None if not found).
    pub fn resolve_optional<T: FromStr>(
        &self,
        env_key: &str,
        prop_keys: &[&str],
        props: &HashMap<String, String>,
    ) -> Option<T> {
        self.resolve_raw(env_key, prop_keys, props)
            .into_iter()
            .find_map(|(source, raw)| match raw.parse::<T>() {
                Ok(parsed) => {
                    log::debug!(
                        "PropertyResolver: {} = '{}' (from {})",
                        self.env_var_name(env_key),
                        raw,
                        source
                    );
                    Some(parsed)
                }
                Err(_) => {
                    log::warn!(
                        "PropertyResolver: {} = '{}' could not be parsed, using fallback",
                        source,
                        raw
                    );
                    None
                }
            })
    }

    /// Raw candidate strings in precedence order, tagged with their source.
    ///
    /// Used by callers whose parsing needs a proper error instead of a silent
    /// fallback.
    pub fn resolve_raw(
        &self,
        env_key: &str,
        prop_keys: &[&str],
        props: &HashMap<String, String>,
    ) -> Vec<(String, String)> {
        let full_env_key = self.env_var_name(env_key);
        let mut candidates = Vec::new();

        if let Ok(env_value) = std::env::var(&full_env_key) {
            candidates.push((full_env_key, env_value));
        }
        for prop_key in prop_keys {
            if let Some(prop_value) = props.get(*prop_key) {
                candidates.push((prop_key.to_string(), prop_value.clone()));
            }
        }
        candidates
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the full environment variable name
    pub fn env_var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

/// Default resolver with the MYSQL_COMPAT_ prefix
pub fn default_resolver() -> PropertyResolver {
    PropertyResolver::default()
}
