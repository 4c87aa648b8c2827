//! Configuration for the function library.
//!
//! - [`resolver`] - environment/property/default precedence chain
//! - [`compat_config`] - the typed [`CompatConfig`] built from it

pub mod compat_config;
pub mod resolver;

pub use compat_config::{CompatConfig, OctetPolicy};
pub use resolver::PropertyResolver;
