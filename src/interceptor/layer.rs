//! Tower layer for composing the timeout interceptor into a service stack.
//!
//! The inner service runs on the worker task and receives the derived call
//! context in place of the inbound one.

use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tower::{Layer, Service, ServiceExt};

use crate::context::CallContext;
use crate::interceptor::executor::execute;
use crate::interceptor::info::CallInfo;
use crate::interceptor::outcome::CallError;

/// An inbound RPC as seen by the service stack.
#[derive(Debug, Clone)]
pub struct RpcRequest<T> {
    pub context: CallContext,
    pub info: CallInfo,
    pub message: T,
}

impl<T> RpcRequest<T> {
    pub fn new(info: CallInfo, message: T) -> Self {
        Self {
            context: CallContext::background(),
            info,
            message,
        }
    }

    pub fn with_context(mut self, context: CallContext) -> Self {
        self.context = context;
        self
    }
}

/// Layer applying [`TimeoutService`] with a default timeout.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutLayer {
    default_timeout: Duration,
}

impl TimeoutLayer {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService {
            inner,
            default_timeout: self.default_timeout,
        }
    }
}

/// Service that runs each request through the bounded executor.
#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
    default_timeout: Duration,
}

impl<S, T> Service<RpcRequest<T>> for TimeoutService<S>
where
    S: Service<RpcRequest<T>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
    S::Error: Send + 'static,
    T: Send + 'static,
{
    type Response = S::Response;
    type Error = CallError<S::Error>;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Inner readiness is awaited on the worker, inside the deadline.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: RpcRequest<T>) -> Self::Future {
        let inner = self.inner.clone();
        let default_timeout = self.default_timeout;

        Box::pin(async move {
            let RpcRequest {
                context,
                info,
                message,
            } = request;
            let worker_info = info.clone();

            execute(
                &context,
                &info,
                default_timeout,
                message,
                move |call_ctx, message| {
                    inner.oneshot(RpcRequest {
                        context: call_ctx,
                        info: worker_info,
                        message,
                    })
                },
            )
            .await
        })
    }
}
