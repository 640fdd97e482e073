//! Per-call deadline and cancellation carrier.
//!
//! # Responsibilities
//! - Carry an optional deadline and a cooperative cancellation signal
//! - Derive bounded child contexts for a single invocation
//! - Report why a context finished (canceled vs. deadline elapsed)
//!
//! # Design Decisions
//! - Cancellation is advisory: handlers observe it, nothing is aborted
//! - Child deadlines never outlive the parent deadline
//! - Canceling a child never cancels its parent
//! - The first observed reason is latched and shared by all clones

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Why a [`CallContext`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The context (or one of its ancestors) was canceled.
    #[error("context canceled")]
    Canceled,

    /// The context deadline elapsed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Deadline and cancellation state for one invocation.
///
/// Clones share the same signal; [`CallContext::with_timeout`] derives a child.
#[derive(Debug, Clone)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    reason: Arc<OnceLock<ContextError>>,
}

impl CallContext {
    /// A root context with no deadline that is only finished by [`CallContext::cancel`].
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
            reason: Arc::new(OnceLock::new()),
        }
    }

    /// Derive a child context whose deadline is at most `timeout` from now.
    ///
    /// A timeout too large to represent as an instant leaves the parent
    /// deadline in place (none for a background parent).
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(parent), Some(candidate)) => Some(parent.min(candidate)),
            (parent, None) => parent,
            (None, candidate) => candidate,
        };

        Self {
            token: self.token.child_token(),
            deadline,
            reason: Arc::new(OnceLock::new()),
        }
    }

    /// Fire the cancellation signal for this context and its children.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// The reason this context finished, without waiting.
    pub fn err(&self) -> Option<ContextError> {
        if let Some(reason) = self.reason.get() {
            return Some(*reason);
        }

        let observed = if self.token.is_cancelled() {
            ContextError::Canceled
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            ContextError::DeadlineExceeded
        } else {
            return None;
        };

        Some(*self.reason.get_or_init(|| observed))
    }

    /// Wait until the context is canceled or its deadline elapses.
    pub async fn done(&self) -> ContextError {
        if let Some(reason) = self.err() {
            return reason;
        }

        let observed = match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => ContextError::Canceled,
                _ = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Canceled
            }
        };

        *self.reason.get_or_init(|| observed)
    }

    /// Cancel this context when the returned guard is dropped.
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}
