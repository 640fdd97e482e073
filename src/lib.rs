//! Deadline-bounded execution for inbound RPC calls.
//!
//! Every intercepted call runs on a worker task under a per-route timeout and
//! resolves to exactly one outcome: the handler's result, a deadline or
//! cancellation error, or a handler panic re-raised on the calling task.

pub mod config;
pub mod context;
pub mod interceptor;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::InterceptorConfig;
pub use context::{CallContext, ContextError};
pub use interceptor::{CallError, CallInfo, Outcome, TimeoutInterceptor, TimeoutLayer};
pub use resilience::panic_relay::RelayedFailure;
pub use resilience::registry::set_timeout;
pub use resilience::timeouts::{resolve_timeout, RpcService, TimeoutStrategy};
