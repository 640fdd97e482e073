//! Timeout resolution.
//!
//! # Responsibilities
//! - Pick the effective timeout for a route
//! - Let a hosting server override resolution through a strategy
//!
//! # Resolution Order
//! ```text
//! server strategy (if the server exposes one) → registry override → default
//! ```
//!
//! # Design Decisions
//! - A strategy wins unconditionally, even over a registry entry for the same route
//! - Resolution has no error path; misconfiguration falls back to the default

use std::fmt;
use std::time::Duration;

use crate::resilience::registry;

/// Server-provided timeout selection.
pub trait TimeoutStrategy: Send + Sync {
    fn timeout_for(&self, route: &str, default_timeout: Duration) -> Duration;
}

/// A hosting server. Servers opt into custom timeouts by returning a strategy.
pub trait RpcService: Send + Sync {
    fn timeout_strategy(&self) -> Option<&dyn TimeoutStrategy> {
        None
    }
}

/// Where a resolved timeout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutSource {
    Strategy,
    Registry,
    Default,
}

impl fmt::Display for TimeoutSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutSource::Strategy => write!(f, "strategy"),
            TimeoutSource::Registry => write!(f, "registry"),
            TimeoutSource::Default => write!(f, "default"),
        }
    }
}

/// Resolve the effective timeout for `route`.
pub fn resolve_timeout(
    server: Option<&dyn RpcService>,
    route: &str,
    default_timeout: Duration,
) -> Duration {
    resolve_timeout_with_source(server, route, default_timeout).0
}

/// Like [`resolve_timeout`], also reporting which source decided.
pub fn resolve_timeout_with_source(
    server: Option<&dyn RpcService>,
    route: &str,
    default_timeout: Duration,
) -> (Duration, TimeoutSource) {
    if let Some(strategy) = server.and_then(|s| s.timeout_strategy()) {
        return (
            strategy.timeout_for(route, default_timeout),
            TimeoutSource::Strategy,
        );
    }

    match registry::registered_timeout(route) {
        Some(timeout) => (timeout, TimeoutSource::Registry),
        None => (default_timeout, TimeoutSource::Default),
    }
}
