//! Unary timeout interceptor.

use std::future::Future;
use std::time::Duration;

use crate::context::CallContext;
use crate::interceptor::executor::execute;
use crate::interceptor::info::CallInfo;
use crate::interceptor::outcome::CallError;

/// Wraps unary handlers with a bounded execution budget.
///
/// `default_timeout` applies to routes with no registry override and no
/// server strategy.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutInterceptor {
    default_timeout: Duration,
}

impl TimeoutInterceptor {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Invoke `handler` for one inbound call.
    pub async fn intercept<Req, Resp, E, H, Fut>(
        &self,
        inbound: &CallContext,
        info: &CallInfo,
        request: Req,
        handler: H,
    ) -> Result<Resp, CallError<E>>
    where
        H: FnOnce(CallContext, Req) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Resp, E>> + Send + 'static,
        Req: Send + 'static,
        Resp: Send + 'static,
        E: Send + 'static,
    {
        execute(inbound, info, self.default_timeout, request, handler).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_intercept_uses_default_timeout() {
        let interceptor = TimeoutInterceptor::new(Duration::from_millis(20));
        let info = CallInfo::new("/unary.Test/Default");

        let result = interceptor
            .intercept(&CallContext::background(), &info, (), |_ctx, _req| async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok::<_, String>(())
            })
            .await;

        assert!(matches!(result, Err(CallError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_handler_sees_deadline() {
        let interceptor = TimeoutInterceptor::new(Duration::from_secs(3));
        let info = CallInfo::new("/unary.Test/Deadline");

        let remaining = interceptor
            .intercept(&CallContext::background(), &info, (), |ctx: CallContext, _req| async move {
                Ok::<_, String>(ctx.remaining())
            })
            .await
            .unwrap()
            .unwrap();

        assert!(remaining <= Duration::from_secs(3));
        assert!(remaining > Duration::from_secs(2));
    }
}
