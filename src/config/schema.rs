//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resilience::registry;

/// Root configuration for the timeout interceptor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Timeout for routes without an override, in milliseconds.
    pub default_timeout_ms: u64,

    /// Per-route timeout overrides.
    pub routes: Vec<RouteTimeoutConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 2000,
            routes: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl InterceptorConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Register every route override in the process-wide registry.
    pub fn apply_routes(&self) {
        for route in &self.routes {
            registry::set_timeout(route.route.clone(), route.timeout());
        }
        tracing::info!(routes = self.routes.len(), "Route timeouts applied");
    }
}

/// Timeout override for one route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteTimeoutConfig {
    /// Fully-qualified route, e.g. "/greeter.Greeter/SayHello".
    pub route: String,

    /// Timeout in milliseconds.
    pub timeout_ms: u64,
}

impl RouteTimeoutConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "rpc_deadline=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
