//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: InterceptorConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::InterceptorConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default_timeout_ms must be greater than zero")]
    ZeroDefaultTimeout,

    #[error("route #{index} has an empty name")]
    EmptyRoute { index: usize },

    #[error("route {route} has a zero timeout")]
    ZeroRouteTimeout { route: String },

    #[error("route {route} is configured more than once")]
    DuplicateRoute { route: String },

    #[error("invalid metrics address: {address}")]
    InvalidMetricsAddress { address: String },
}

/// Check a parsed config, collecting every problem.
pub fn validate_config(config: &InterceptorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.default_timeout_ms == 0 {
        errors.push(ValidationError::ZeroDefaultTimeout);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.route.trim().is_empty() {
            errors.push(ValidationError::EmptyRoute { index });
            continue;
        }
        if route.timeout_ms == 0 {
            errors.push(ValidationError::ZeroRouteTimeout {
                route: route.route.clone(),
            });
        }
        if !seen.insert(route.route.as_str()) {
            errors.push(ValidationError::DuplicateRoute {
                route: route.route.clone(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress {
            address: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteTimeoutConfig;

    fn route(name: &str, timeout_ms: u64) -> RouteTimeoutConfig {
        RouteTimeoutConfig {
            route: name.into(),
            timeout_ms,
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&InterceptorConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = InterceptorConfig::default();
        config.default_timeout_ms = 0;
        config.routes.push(route("", 10));
        config.routes.push(route("/a.B/C", 0));
        config.routes.push(route("/a.B/D", 10));
        config.routes.push(route("/a.B/D", 20));
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroDefaultTimeout,
                ValidationError::EmptyRoute { index: 0 },
                ValidationError::ZeroRouteTimeout { route: "/a.B/C".into() },
                ValidationError::DuplicateRoute { route: "/a.B/D".into() },
                ValidationError::InvalidMetricsAddress { address: "not-an-address".into() },
            ]
        );
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = InterceptorConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());
    }
}
