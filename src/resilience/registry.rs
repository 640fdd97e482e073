//! Process-wide per-route timeout overrides.
//!
//! # Design Decisions
//! - Sharded concurrent map; reads on every call never block writers of other routes
//! - Only point reads and writes are exposed, the map is never iterated
//! - Lives for the whole process, entries are overwritten but never removed

use std::sync::LazyLock;
use std::time::Duration;

use dashmap::DashMap;

static ROUTE_TIMEOUTS: LazyLock<DashMap<String, Duration>> = LazyLock::new(DashMap::new);

/// Set the timeout for a fully-qualified route. Last write wins.
pub fn set_timeout(route: impl Into<String>, timeout: Duration) {
    let route = route.into();
    tracing::debug!(route = %route, timeout = ?timeout, "Route timeout registered");
    ROUTE_TIMEOUTS.insert(route, timeout);
}

/// Look up the registered override for a route.
pub fn registered_timeout(route: &str) -> Option<Duration> {
    ROUTE_TIMEOUTS.get(route).map(|entry| *entry.value())
}
