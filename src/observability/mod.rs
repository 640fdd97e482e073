//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every intercepted call produces:
//!     → logging.rs (structured events inside an `rpc_call` span)
//!     → metrics.rs (outcome counters, latency histogram)
//!
//! Consumers:
//!     → Log output (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Each call span carries the route and a fresh call ID
//! - Metrics are cheap (atomic increments)
//! - Metrics recording is a no-op until an exporter is installed

pub mod logging;
pub mod metrics;
