//! Runtime configuration for the function library.
//!
//! Configuration is resolved once by the host and shared read-only with
//! every call through [`crate::sql::execution::FunctionContext`].
//!
//! | Property                  | Environment variable                | Default      |
//! |---------------------------|-------------------------------------|--------------|
//! | `session.time_zone`       | `MYSQL_COMPAT_SESSION_TIME_ZONE`    | `UTC`        |
//! | `inet.octet_policy`       | `MYSQL_COMPAT_INET_OCTET_POLICY`    | `checked`    |
//! | `format.max_decimals`     | `MYSQL_COMPAT_FORMAT_MAX_DECIMALS`  | `30`         |
//! | `trim.default_chars`      | `MYSQL_COMPAT_TRIM_DEFAULT_CHARS`   | space/tab/CR/LF |

use super::resolver::{PropertyResolver, default_resolver};
use crate::sql::error::{SqlError, SqlResult};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Characters stripped by TRIM/LTRIM/RTRIM when no set is given
pub const DEFAULT_TRIM_CHARS: &str = " \t\r\n";

/// Largest number of fraction digits FORMAT will render
pub const DEFAULT_FORMAT_MAX_DECIMALS: u32 = 30;

/// Ceiling accepted for `format.max_decimals`
pub const FORMAT_MAX_DECIMALS_LIMIT: u32 = 1000;

pub const PROP_SESSION_TIME_ZONE: &str = "session.time_zone";
pub const PROP_INET_OCTET_POLICY: &str = "inet.octet_policy";
pub const PROP_FORMAT_MAX_DECIMALS: &str = "format.max_decimals";
pub const PROP_TRIM_DEFAULT_CHARS: &str = "trim.default_chars";

/// How INET_ATON treats dotted-quad components above 255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OctetPolicy {
    /// Components must be 0..=255; anything else yields NULL
    #[default]
    Checked,
    /// Any component that fits in 32 bits is accepted and packed with
    /// wrapping shifts, as an unchecked `%u.%u.%u.%u` scan would
    Unchecked,
}

impl FromStr for OctetPolicy {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checked" | "strict" => Ok(OctetPolicy::Checked),
            "unchecked" | "lenient" => Ok(OctetPolicy::Unchecked),
            other => Err(SqlError::config_error(
                PROP_INET_OCTET_POLICY,
                format!("unknown octet policy '{}' (expected checked or unchecked)", other),
            )),
        }
    }
}

impl fmt::Display for OctetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OctetPolicy::Checked => f.write_str("checked"),
            OctetPolicy::Unchecked => f.write_str("unchecked"),
        }
    }
}

/// Function library configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CompatConfig {
    /// Zone used to build calendar breakdowns (DATE_FORMAT, month/year diffs)
    pub session_time_zone: FixedOffset,
    /// Range policy for INET_ATON components
    pub inet_octet_policy: OctetPolicy,
    /// Upper bound on FORMAT's decimals argument
    pub format_max_decimals: u32,
    /// Trim set used when TRIM/LTRIM/RTRIM get a single argument
    pub default_trim_chars: String,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            session_time_zone: utc_offset(),
            inet_octet_policy: OctetPolicy::Checked,
            format_max_decimals: DEFAULT_FORMAT_MAX_DECIMALS,
            default_trim_chars: DEFAULT_TRIM_CHARS.to_string(),
        }
    }
}

/// File form of the configuration, as read from JSON
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompatConfig {
    session_time_zone: Option<String>,
    inet_octet_policy: Option<String>,
    format_max_decimals: Option<u32>,
    default_trim_chars: Option<String>,
}

impl CompatConfig {
    /// Resolve from environment variables only
    pub fn from_env() -> SqlResult<Self> {
        Self::from_properties(&HashMap::new())
    }

    /// Resolve from a property map, with environment variables taking precedence
    pub fn from_properties(props: &HashMap<String, String>) -> SqlResult<Self> {
        Self::resolve_with(&default_resolver(), props)
    }

    /// Resolve using a specific resolver (custom env prefix)
    pub fn resolve_with(
        resolver: &PropertyResolver,
        props: &HashMap<String, String>,
    ) -> SqlResult<Self> {
        let mut config = CompatConfig::default();

        if let Some((source, raw)) = first_candidate(
            resolver,
            "SESSION_TIME_ZONE",
            &[PROP_SESSION_TIME_ZONE, "time_zone"],
            props,
        ) {
            config.session_time_zone = parse_time_zone(&raw).map_err(|e| match e {
                SqlError::ConfigError { message, .. } => SqlError::config_error(source, message),
                other => other,
            })?;
        }

        if let Some((_, raw)) = first_candidate(
            resolver,
            "INET_OCTET_POLICY",
            &[PROP_INET_OCTET_POLICY],
            props,
        ) {
            config.inet_octet_policy = raw.parse()?;
        }

        if let Some((source, raw)) = first_candidate(
            resolver,
            "FORMAT_MAX_DECIMALS",
            &[PROP_FORMAT_MAX_DECIMALS],
            props,
        ) {
            let max = raw.trim().parse::<u32>().map_err(|e| {
                SqlError::config_error(
                    &source,
                    format!("invalid decimal count '{}': {}", raw, e),
                )
            })?;
            config.format_max_decimals = check_max_decimals(&source, max)?;
        }

        if let Some((_, raw)) = first_candidate(
            resolver,
            "TRIM_DEFAULT_CHARS",
            &[PROP_TRIM_DEFAULT_CHARS],
            props,
        ) {
            config.default_trim_chars = raw;
        }

        log::debug!(
            "Resolved function config: time_zone={}, inet_octet_policy={}, format_max_decimals={}",
            config.session_time_zone,
            config.inet_octet_policy,
            config.format_max_decimals
        );
        Ok(config)
    }

    /// Load from a JSON document; absent keys keep their defaults
    ///
    /// ```rust
    /// use mysql_compat::sql::config::CompatConfig;
    ///
    /// let config = CompatConfig::from_json(r#"{"session_time_zone": "+02:00"}"#).unwrap();
    /// assert_eq!(config.session_time_zone.local_minus_utc(), 7200);
    /// ```
    pub fn from_json(json: &str) -> SqlResult<Self> {
        let raw: RawCompatConfig = serde_json::from_str(json)
            .map_err(|e| SqlError::config_error("json", e.to_string()))?;

        let mut config = CompatConfig::default();
        if let Some(tz) = raw.session_time_zone {
            config.session_time_zone = parse_time_zone(&tz)?;
        }
        if let Some(policy) = raw.inet_octet_policy {
            config.inet_octet_policy = policy.parse()?;
        }
        if let Some(max) = raw.format_max_decimals {
            config.format_max_decimals = check_max_decimals(PROP_FORMAT_MAX_DECIMALS, max)?;
        }
        if let Some(chars) = raw.default_trim_chars {
            config.default_trim_chars = chars;
        }
        Ok(config)
    }
}

fn first_candidate(
    resolver: &PropertyResolver,
    env_key: &str,
    prop_keys: &[&str],
    props: &HashMap<String, String>,
) -> Option<(String, String)> {
    resolver
        .resolve_raw(env_key, prop_keys, props)
        .into_iter()
        .next()
}

fn check_max_decimals(source: &str, max: u32) -> SqlResult<u32> {
    if max > FORMAT_MAX_DECIMALS_LIMIT {
        return Err(SqlError::config_error(
            source,
            format!("{} exceeds the limit of {}", max, FORMAT_MAX_DECIMALS_LIMIT),
        ));
    }
    Ok(max)
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Parse `UTC`, `Z`, `+HH:MM`, `-HH:MM` or `+HHMM`
pub fn parse_time_zone(raw: &str) -> SqlResult<FixedOffset> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
        return Ok(utc_offset());
    }
    FixedOffset::from_str(trimmed).map_err(|e| {
        SqlError::config_error(
            PROP_SESSION_TIME_ZONE,
            format!("invalid time zone offset '{}': {}", trimmed, e),
        )
    })
}
