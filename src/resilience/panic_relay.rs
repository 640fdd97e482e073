//! Panic relay between a worker task and the task that owns the call.
//!
//! A panic on a detached worker would otherwise only be seen by the runtime.
//! The worker captures it as a [`RelayedFailure`], hands it over a one-slot
//! channel, and the owner re-raises it with [`RelayedFailure::raise`].

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tokio::sync::oneshot;

/// A captured panic: its description plus the stack trace at capture time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedFailure {
    description: String,
    stack: String,
}

impl RelayedFailure {
    /// Capture a panic payload. Payloads that already are a `RelayedFailure`
    /// pass through untouched.
    pub fn capture(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<RelayedFailure>() {
            Ok(failure) => return *failure,
            Err(payload) => payload,
        };

        let description = describe(payload.as_ref());
        let backtrace = Backtrace::force_capture().to_string();
        let stack = format!("{}\n\n{}", description, backtrace.trim());

        Self { description, stack }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Description followed by the captured backtrace.
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Resume the panic on the current task.
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }
}

impl fmt::Display for RelayedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stack)
    }
}

fn describe(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Producer half of the relay. Delivery consumes it, so it happens at most once.
#[derive(Debug)]
pub struct FaultSender(oneshot::Sender<RelayedFailure>);

impl FaultSender {
    /// Hand the failure to the owner. Never blocks; returns false when the
    /// owner has already stopped listening.
    pub fn deliver(self, failure: RelayedFailure) -> bool {
        self.0.send(failure).is_ok()
    }
}

pub type FaultReceiver = oneshot::Receiver<RelayedFailure>;

/// Create a single-slot relay.
pub fn relay_channel() -> (FaultSender, FaultReceiver) {
    let (tx, rx) = oneshot::channel();
    (FaultSender(tx), rx)
}

/// Drive `fut`, turning a panic (including one raised while the future is
/// first polled) into a `RelayedFailure`.
pub async fn guard<F>(fut: F) -> Result<F::Output, RelayedFailure>
where
    F: Future,
{
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .map_err(RelayedFailure::capture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_passes_output() {
        let result = guard(async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_guard_captures_str_panic() {
        let failure = guard(async { panic!("boom") }).await.unwrap_err();

        assert_eq!(failure.description(), "boom");
        assert!(failure.stack().starts_with("boom"));
        assert!(failure.stack().len() > "boom".len());
    }

    #[tokio::test]
    async fn test_guard_captures_formatted_panic() {
        let code = 42;
        let failure = guard(async move { panic!("bad code {}", code) })
            .await
            .unwrap_err();

        assert_eq!(failure.description(), "bad code 42");
    }

    #[test]
    fn test_capture_non_string_payload() {
        let failure = RelayedFailure::capture(Box::new(17u32));
        assert_eq!(failure.description(), "non-string panic payload");
    }

    #[test]
    fn test_relayed_failure_passes_through() {
        let original = RelayedFailure::capture(Box::new("inner"));
        let forwarded = RelayedFailure::capture(Box::new(original.clone()));

        assert_eq!(forwarded, original);
    }

    #[test]
    fn test_raise_preserves_failure() {
        let original = RelayedFailure::capture(Box::new("raised"));
        let raised = original.clone();

        let payload = std::panic::catch_unwind(move || raised.raise()).unwrap_err();
        let caught = payload.downcast_ref::<RelayedFailure>().unwrap();

        assert_eq!(caught, &original);
    }

    #[test]
    fn test_delivery_without_listener() {
        let (tx, rx) = relay_channel();
        drop(rx);

        assert!(!tx.deliver(RelayedFailure::capture(Box::new("late"))));
    }

    #[tokio::test]
    async fn test_delivery_before_listener() {
        let (tx, rx) = relay_channel();
        assert!(tx.deliver(RelayedFailure::capture(Box::new("early"))));

        let failure = rx.await.unwrap();
        assert_eq!(failure.description(), "early");
    }
}
