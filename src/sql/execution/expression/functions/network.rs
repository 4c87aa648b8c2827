//! INET_ATON(ip): dotted-quad IPv4 text to its integer value.

use super::arg_text;
use crate::register_sql_function;
use crate::sql::config::OctetPolicy;
use crate::sql::error::SqlError;
use crate::sql::execution::context::FunctionContext;
use crate::sql::execution::expression::function_metadata::{
    FunctionCategory, FunctionSignature, ParamKind, ReturnKind, Volatility,
};
use crate::sql::execution::types::{FieldValue, ValueKind};

/// INET_ATON("a.b.c.d") → `a<<24 | b<<16 | c<<8 | d`.
///
/// Anything but four non-empty, all-digit components yields NULL, as do
/// components above 255 under [`OctetPolicy::Checked`].
pub fn inet_aton_function(args: &[FieldValue], ctx: &FunctionContext) -> Result<FieldValue, SqlError> {
    let Some(ip) = arg_text("INET_ATON", args, 0)? else {
        return Ok(FieldValue::Null);
    };

    match inet_aton(ip, ctx.config().inet_octet_policy) {
        Some(value) => Ok(FieldValue::Integer(value)),
        None => {
            log::debug!("INET_ATON: rejected '{}'", ip);
            Ok(FieldValue::Null)
        }
    }
}

/// Parse and pack a dotted quad under `policy`
pub fn inet_aton(ip: &str, policy: OctetPolicy) -> Option<i64> {
    let mut octets = [0u32; 4];
    let mut parts = ip.split('.');

    for slot in octets.iter_mut() {
        *slot = parse_component(parts.next()?)?;
    }
    if parts.next().is_some() {
        return None;
    }

    let [a, b, c, d] = octets;
    match policy {
        OctetPolicy::Checked => {
            if octets.iter().any(|&o| o > 255) {
                return None;
            }
            Some(i64::from(a << 24 | b << 16 | c << 8 | d))
        }
        // high bits of the shifted 32-bit terms are dropped
        OctetPolicy::Unchecked => {
            Some(i64::from(a) << 24 | i64::from(b << 16) | i64::from(c << 8) | i64::from(d))
        }
    }
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

register_sql_function!(
    name: "INET_ATON",
    aliases: [],
    category: FunctionCategory::Network,
    signature: FunctionSignature::fixed(&[ParamKind::Text], ReturnKind::Fixed(ValueKind::Integer))
        .with_volatility(Volatility::Stable),
    description: "Integer value of a dotted-quad IPv4 address",
    handler: inet_aton_function
);
