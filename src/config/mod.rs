//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → InterceptorConfig (validated)
//!     → apply_routes() writes per-route overrides into the timeout registry
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new config sent to the owner, which re-applies route overrides
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Routes dropped from the file keep their last registered timeout

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::InterceptorConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteTimeoutConfig;
