//! Bounded execution of inbound calls.
//!
//! # Data Flow
//! ```text
//! Inbound call (context, route, request)
//!     → unary.rs / layer.rs (entry points: closure handler or tower service)
//!     → executor.rs
//!         → resilience::timeouts (effective timeout)
//!         → CallContext::with_timeout (derived deadline)
//!         → worker task runs the handler
//!         → race: relayed panic | completion | deadline/cancel
//!     → outcome.rs (result or distinguished error; panics are re-raised)
//! ```
//!
//! # Design Decisions
//! - Exactly one outcome per call
//! - The worker is never aborted; once the race is decided its result is dropped
//! - The derived context is canceled when the call returns so workers can stop early

pub mod executor;
pub mod info;
pub mod layer;
pub mod outcome;
pub mod unary;

pub use executor::execute;
pub use info::CallInfo;
pub use layer::{RpcRequest, TimeoutLayer, TimeoutService};
pub use outcome::{CallError, Code, Outcome};
pub use unary::TimeoutInterceptor;
