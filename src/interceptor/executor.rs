//! Bounded executor.
//!
//! # State Machine
//! ```text
//! Pending → Succeeded | Failed | DeadlineExceeded | Canceled | Faulted
//! ```
//! Every state after `Pending` is terminal and reached exactly once.
//!
//! # Race Priority
//! When several events are ready at the same instant the winner is fixed:
//! relayed panic, then handler completion, then deadline/cancellation.
//! A deadline or cancellation yields once before it is reported so a worker
//! woken by the same timer tick can hand over its result first.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::context::CallContext;
use crate::interceptor::info::CallInfo;
use crate::interceptor::outcome::CallError;
use crate::observability::metrics;
use crate::resilience::panic_relay::{self, RelayedFailure};
use crate::resilience::timeouts::resolve_timeout_with_source;

/// Run `handler` under the route's effective timeout.
///
/// Returns the handler's result, [`CallError::DeadlineExceeded`] or
/// [`CallError::Canceled`]. A panic inside the handler is re-raised on the
/// calling task instead of being returned.
pub async fn execute<Req, Resp, E, H, Fut>(
    inbound: &CallContext,
    info: &CallInfo,
    default_timeout: Duration,
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
    let route = info.route();
    let span = tracing::debug_span!("rpc_call", route = %route, call_id = %uuid::Uuid::new_v4());

    async move {
        let started = Instant::now();
        let (timeout, source) = resolve_timeout_with_source(info.server(), route, default_timeout);
        tracing::debug!(timeout = ?timeout, source = %source, "Resolved call timeout");

        let call_ctx = inbound.with_timeout(timeout);
        let _cancel_on_return = call_ctx.drop_guard();

        let (done_tx, mut done_rx) = oneshot::channel();
        let (fault_tx, mut fault_rx) = panic_relay::relay_channel();
        let worker_ctx = call_ctx.clone();

        tokio::spawn(
            async move {
                match panic_relay::guard(async move { handler(worker_ctx, request).await }).await {
                    Ok(result) => {
                        // Receiver is gone once the race went another way.
                        let _ = done_tx.send(result);
                    }
                    Err(failure) => {
                        if !fault_tx.deliver(failure) {
                            tracing::debug!("Handler panicked after the call was decided");
                        }
                    }
                }
            }
            .in_current_span(),
        );

        let result = tokio::select! {
            biased;
            Ok(failure) = &mut fault_rx => reraise(route, started, failure),
            Ok(result) = &mut done_rx => result.map_err(CallError::Handler),
            reason = call_ctx.done() => {
                tokio::task::yield_now().await;
                if let Ok(failure) = fault_rx.try_recv() {
                    reraise(route, started, failure)
                }
                match done_rx.try_recv() {
                    Ok(result) => result.map_err(CallError::Handler),
                    Err(_) => Err(CallError::from(reason)),
                }
            }
        };

        match &result {
            Ok(_) => metrics::record_call(route, "success", started),
            Err(CallError::Handler(_)) => metrics::record_call(route, "failure", started),
            Err(CallError::DeadlineExceeded) => {
                tracing::warn!(timeout = ?timeout, "Call deadline exceeded");
                metrics::record_call(route, "deadline_exceeded", started);
            }
            Err(CallError::Canceled) => {
                tracing::info!("Call canceled by caller");
                metrics::record_call(route, "canceled", started);
            }
        }

        result
    }
    .instrument(span)
    .await
}

fn reraise(route: &str, started: Instant, failure: RelayedFailure) -> ! {
    metrics::record_fault(route, started);
    tracing::error!(description = failure.description(), "Handler panicked, re-raising on caller");
    failure.raise()
}
