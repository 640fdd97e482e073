//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Ctrl+C → wait_for_signal() → Shutdown::trigger() → subscribed tasks exit
//! ```

pub mod shutdown;

pub use shutdown::{wait_for_signal, Shutdown};
