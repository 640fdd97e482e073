//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound call (route, default timeout):
//!     → timeouts.rs (server strategy, else registry.rs override, else default)
//!     → interceptor runs the handler on a worker task
//!     → On panic: panic_relay.rs (capture on worker, re-raise on caller)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every call has a deadline
//! - Timeout resolution never fails, it falls back to the default
//! - Panics keep their severity across the worker/caller boundary

pub mod panic_relay;
pub mod registry;
pub mod timeouts;
