//! Per-call routing information handed to the interceptor.

use std::fmt;
use std::sync::Arc;

use crate::resilience::timeouts::RpcService;

/// The invoked route and the server hosting it.
#[derive(Clone)]
pub struct CallInfo {
    route: Arc<str>,
    server: Option<Arc<dyn RpcService>>,
}

impl CallInfo {
    /// Info for a fully-qualified route, e.g. `/greeter.Greeter/SayHello`.
    pub fn new(route: impl Into<Arc<str>>) -> Self {
        Self {
            route: route.into(),
            server: None,
        }
    }

    /// Attach the hosting server so its timeout strategy can be consulted.
    pub fn with_server(mut self, server: Arc<dyn RpcService>) -> Self {
        self.server = Some(server);
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn server(&self) -> Option<&dyn RpcService> {
        self.server.as_deref()
    }
}

impl fmt::Debug for CallInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallInfo")
            .field("route", &self.route)
            .field("server", &self.server.is_some())
            .finish()
    }
}
