//! Shared helpers for interceptor integration tests.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rpc_deadline::{CallContext, RpcService, TimeoutStrategy};

/// A handler that works for `delay` and then answers with `reply`.
pub fn sleepy_handler(
    delay: Duration,
    reply: &'static str,
) -> impl FnOnce(CallContext, ()) -> std::pin::Pin<Box<dyn Future<Output = Result<&'static str, String>> + Send>>
       + Send
       + 'static {
    move |_ctx, _req| {
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(reply)
        })
    }
}

/// A server whose strategy always answers with a fixed timeout.
pub struct FixedTimeoutServer {
    pub timeout: Duration,
}

impl TimeoutStrategy for FixedTimeoutServer {
    fn timeout_for(&self, _route: &str, _default_timeout: Duration) -> Duration {
        self.timeout
    }
}

impl RpcService for FixedTimeoutServer {
    fn timeout_strategy(&self) -> Option<&dyn TimeoutStrategy> {
        Some(self)
    }
}

/// A server that does not customize timeouts.
pub struct PlainServer;

impl RpcService for PlainServer {}

#[allow(dead_code)]
pub fn fixed_server(timeout: Duration) -> Arc<dyn RpcService> {
    Arc::new(FixedTimeoutServer { timeout })
}
