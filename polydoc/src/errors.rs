use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for polydoc operations.
///
/// Each kind describes one category of failure so that callers can tell a
/// configuration mistake apart from a transient transport failure without
/// inspecting error messages.
///
/// # Examples
///
/// ```rust,ignore
/// use polydoc::errors::{PolydocError, ErrorKind, PolydocResult};
///
/// fn example() -> PolydocResult<()> {
///     Err(PolydocError::new("settings is required", ErrorKind::Validation))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A required argument is absent or empty, or an operation was invoked
    /// against a builder in an illegal state (e.g. reuse after `build`).
    Validation,
    /// The backend's native client failed (connection refused, protocol
    /// error, timeout). Adapters raise it; the core never wraps or retries it.
    Communication,
    /// A single-result query matched more than one entity.
    NonUniqueResult,
    /// A value cannot be interpreted as the requested type.
    InvalidDataType,
    /// Internal error (usually indicates a bug).
    Internal,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "Validation error"),
            ErrorKind::Communication => write!(f, "Communication error"),
            ErrorKind::NonUniqueResult => write!(f, "Non unique result error"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::Internal => write!(f, "Internal error"),
        }
    }
}

/// Custom polydoc error type.
///
/// `PolydocError` encapsulates the error message, its kind, and an optional
/// cause. It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use polydoc::errors::{PolydocError, ErrorKind};
///
/// // Create a simple error
/// let err = PolydocError::new("collection name is required", ErrorKind::Validation);
///
/// // Create an error with a cause
/// let cause = PolydocError::new("connection refused", ErrorKind::Communication);
/// let err = PolydocError::new_with_cause("insert failed", ErrorKind::Communication, cause);
/// ```
///
/// # Type alias
///
/// The `PolydocResult<T>` type alias is equivalent to `Result<T, PolydocError>`
/// and is used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct PolydocError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<PolydocError>>,
    backtrace: Arc<Backtrace>,
}

impl PolydocError {
    /// Creates a new `PolydocError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        PolydocError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `PolydocError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: PolydocError) -> Self {
        PolydocError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<PolydocError>> {
        self.cause.as_ref()
    }
}

impl Display for PolydocError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for PolydocError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for PolydocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for polydoc operations.
///
/// `PolydocResult<T>` is shorthand for `Result<T, PolydocError>`.
/// All fallible polydoc operations return this type.
pub type PolydocResult<T> = Result<T, PolydocError>;

impl From<String> for PolydocError {
    fn from(msg: String) -> Self {
        PolydocError::new(&msg, ErrorKind::Internal)
    }
}

impl From<&str> for PolydocError {
    fn from(msg: &str) -> Self {
        PolydocError::new(msg, ErrorKind::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polydoc_error_new_creates_error() {
        let error = PolydocError::new("an error occurred", ErrorKind::Validation);
        assert_eq!(error.message(), "an error occurred");
        assert_eq!(error.kind(), &ErrorKind::Validation);
        assert!(error.cause().is_none());
    }

    #[test]
    fn polydoc_error_new_with_cause_creates_chain() {
        let cause = PolydocError::new("connection refused", ErrorKind::Communication);
        let error =
            PolydocError::new_with_cause("insert failed", ErrorKind::Communication, cause);
        assert_eq!(error.message(), "insert failed");
        assert_eq!(error.kind(), &ErrorKind::Communication);
        assert_eq!(error.cause().unwrap().message(), "connection refused");
    }

    #[test]
    fn polydoc_error_source_exposes_cause() {
        let cause = PolydocError::new("root", ErrorKind::Internal);
        let error = PolydocError::new_with_cause("wrapper", ErrorKind::Internal, cause);
        assert!(error.source().is_some());

        let error = PolydocError::new("no cause", ErrorKind::Internal);
        assert!(error.source().is_none());
    }

    #[test]
    fn polydoc_error_display_prints_message() {
        let error = PolydocError::new("readable message", ErrorKind::Validation);
        assert_eq!(format!("{}", error), "readable message");
    }

    #[test]
    fn polydoc_error_debug_includes_cause() {
        let cause = PolydocError::new("root", ErrorKind::Internal);
        let error = PolydocError::new_with_cause("wrapper", ErrorKind::Internal, cause);
        let debug = format!("{:?}", error);
        assert!(debug.contains("wrapper"));
        assert!(debug.contains("Caused by"));
        assert!(debug.contains("root"));
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::Validation), "Validation error");
        assert_eq!(format!("{}", ErrorKind::Communication), "Communication error");
        assert_eq!(
            format!("{}", ErrorKind::NonUniqueResult),
            "Non unique result error"
        );
        assert_eq!(format!("{}", ErrorKind::InvalidDataType), "Invalid data type");
        assert_eq!(format!("{}", ErrorKind::Internal), "Internal error");
    }

    #[test]
    fn polydoc_error_from_str() {
        let error: PolydocError = "boom".into();
        assert_eq!(error.kind(), &ErrorKind::Internal);
        assert_eq!(error.message(), "boom");
    }

    #[test]
    fn polydoc_error_clone_preserves_chain() {
        let cause = PolydocError::new("root", ErrorKind::Communication);
        let error = PolydocError::new_with_cause("wrapper", ErrorKind::Communication, cause);
        let cloned = error.clone();
        assert_eq!(cloned.message(), error.message());
        assert_eq!(cloned.cause().unwrap().message(), "root");
    }
}
