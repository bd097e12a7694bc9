//! Error types for the budget tracker.
//!
//! Internally everything is an `anyhow::Error`. At the points where a failure becomes visible to
//! the user, it is tagged with an `ErrorType` so that callers can decide how to recover, e.g. by
//! re-prompting after a validation failure, starting fresh when no snapshot can be loaded, or
//! asking before replacing state that already exists.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// The category of a user-facing failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Bad user input: a non-numeric or non-positive budget or amount, an empty expense name, or an
    /// attempt to add an expense to an exhausted budget.
    Validation,
    /// The snapshot is missing or malformed, or the store could not be read or written.
    Persistence,
    /// The home directory or its configuration file is missing or invalid.
    Config,
    /// The input was fine but existing state prevents the operation, e.g. a budget is already
    /// saved. Asking for the input again will not help.
    Conflict,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

impl ErrorType {
    /// Finds the `ErrorType` that `err` was tagged with, if any.
    pub fn of(err: &anyhow::Error) -> Option<ErrorType> {
        err.downcast_ref::<Error>().map(Error::error_type)
    }
}

/// A failure tagged with an `ErrorType`. This is carried inside an `anyhow::Error` and can be
/// recovered with `ErrorType::of`.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    /// Creates a `Validation` error from a message that is suitable for showing to the user.
    pub fn validation(message: impl Display + Debug + Send + Sync + 'static) -> anyhow::Error {
        Self::new(ErrorType::Validation, anyhow::Error::msg(message)).into()
    }

    /// Creates a `Persistence` error from a message.
    pub fn persistence(message: impl Display + Debug + Send + Sync + 'static) -> anyhow::Error {
        Self::new(ErrorType::Persistence, anyhow::Error::msg(message)).into()
    }

    /// Creates a `Conflict` error from a message that is suitable for showing to the user.
    pub fn conflict(message: impl Display + Debug + Send + Sync + 'static) -> anyhow::Error {
        Self::new(ErrorType::Conflict, anyhow::Error::msg(message)).into()
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for Error {}

/// Tags the error of a `Result` with an `ErrorType`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let e: anyhow::Error = e.into();
            // Keep the first tag if the error has already been classified.
            if e.is::<Error>() {
                e
            } else {
                Error::new(error_type, e).into()
            }
        })
    }
}
