//! Per-call evaluation context.
//!
//! Every function handler receives the argument list plus a
//! [`FunctionContext`]. The context is read-only: it carries the resolved
//! [`CompatConfig`] and the [`Clock`] that `UNIX_TIMESTAMP()` reads. Nothing
//! in it is mutated by a call, so one context can be shared by any number of
//! concurrent evaluations.

use crate::sql::config::CompatConfig;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Source of "now" for the zero-argument epoch function
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for deterministic evaluation
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shared, immutable state available to every function call
#[derive(Debug, Clone)]
pub struct FunctionContext {
    config: Arc<CompatConfig>,
    clock: Arc<dyn Clock>,
}

impl Default for FunctionContext {
    fn default() -> Self {
        Self::new(CompatConfig::default())
    }
}

impl FunctionContext {
    /// Context with the given config and the system clock
    pub fn new(config: CompatConfig) -> Self {
        Self {
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Freeze the clock at `instant`
    pub fn with_fixed_time(self, instant: DateTime<Utc>) -> Self {
        self.with_clock(Arc::new(FixedClock(instant)))
    }

    pub fn config(&self) -> &CompatConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
