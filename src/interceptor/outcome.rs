//! Call outcomes and the errors returned to callers.

use thiserror::Error;

use crate::context::ContextError;

/// RPC status codes reported for intercepted calls (gRPC numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Canceled = 1,
    Unknown = 2,
    DeadlineExceeded = 4,
}

/// Error returned by a bounded call.
#[derive(Debug, Error)]
pub enum CallError<E> {
    /// The handler finished and returned this error.
    #[error("{0}")]
    Handler(E),

    /// The deadline elapsed before the handler finished.
    #[error("{}", ContextError::DeadlineExceeded)]
    DeadlineExceeded,

    /// The caller went away before the handler finished.
    #[error("{}", ContextError::Canceled)]
    Canceled,
}

impl<E> CallError<E> {
    pub fn code(&self) -> Code {
        match self {
            CallError::Handler(_) => Code::Unknown,
            CallError::DeadlineExceeded => Code::DeadlineExceeded,
            CallError::Canceled => Code::Canceled,
        }
    }

    /// The handler's own error, if that is what this is.
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            CallError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl<E> From<ContextError> for CallError<E> {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Canceled => CallError::Canceled,
            ContextError::DeadlineExceeded => CallError::DeadlineExceeded,
        }
    }
}

/// The single terminal result of a bounded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    Success(T),
    Failure(E),
    DeadlineExceeded,
    Canceled,
}

impl<T, E> Outcome<T, E> {
    /// Metric/log label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Failure(_) => "failure",
            Outcome::DeadlineExceeded => "deadline_exceeded",
            Outcome::Canceled => "canceled",
        }
    }

    pub fn into_result(self) -> Result<T, CallError<E>> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(err) => Err(CallError::Handler(err)),
            Outcome::DeadlineExceeded => Err(CallError::DeadlineExceeded),
            Outcome::Canceled => Err(CallError::Canceled),
        }
    }
}

impl<T, E> From<Result<T, CallError<E>>> for Outcome<T, E> {
    fn from(result: Result<T, CallError<E>>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(CallError::Handler(err)) => Outcome::Failure(err),
            Err(CallError::DeadlineExceeded) => Outcome::DeadlineExceeded,
            Err(CallError::Canceled) => Outcome::Canceled,
        }
    }
}
