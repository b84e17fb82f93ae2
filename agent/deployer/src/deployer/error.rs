use std::fmt::{Display, Formatter};

/// Whether an error is a real failure or a verb that the deployer does not support.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The verb was attempted and failed.
    Failure,

    /// The deployer does not implement the verb.
    Unimplemented,
}

/// The error type returned by [`Deployer`](crate::Deployer) implementations.
#[derive(Debug)]
pub struct DeployerError {
    kind: ErrorKind,

    /// Any message to be included with the error. This will be included in the formatted display
    /// before `inner`.
    context: Option<String>,

    /// The error that caused this error.
    inner: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

/// The result type returned by [`Deployer`](crate::Deployer) operations.
pub type DeployerResult<T> = std::result::Result<T, DeployerError>;

impl DeployerError {
    pub fn new_with_source_and_context<S, E>(context: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            kind: ErrorKind::Failure,
            context: Some(context.into()),
            inner: Some(source.into()),
        }
    }

    pub fn new_with_source<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            kind: ErrorKind::Failure,
            context: None,
            inner: Some(source.into()),
        }
    }

    pub fn new_with_context<S>(context: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            kind: ErrorKind::Failure,
            context: Some(context.into()),
            inner: None,
        }
    }

    /// The error returned by verbs that a deployer does not support.
    pub fn unimplemented<S>(verb: S) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            kind: ErrorKind::Unimplemented,
            context: Some(format!("'{}' is not implemented", verb.as_ref())),
            inner: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_unimplemented(&self) -> bool {
        self.kind == ErrorKind::Unimplemented
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn inner(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.inner.as_ref().map(|some| some.as_ref())
    }
}

impl Display for DeployerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.context(), self.inner()) {
            (Some(context), Some(inner)) => write!(f, "{}: {}", context, inner),
            (Some(context), None) => Display::fmt(context, f),
            (None, Some(inner)) => Display::fmt(inner, f),
            (None, None) => Display::fmt("Deployer error", f),
        }
    }
}

// Make `DeployerError` function as a standard error.
impl std::error::Error for DeployerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// A trait that makes it possible to convert error types to `DeployerError` using a familiar
/// `context` function.
pub trait IntoDeployerError<T> {
    /// Convert `self` into a `DeployerError`.
    fn context<S>(self, message: S) -> DeployerResult<T>
    where
        S: Into<String>;
}

// Implement `IntoDeployerError` for all standard `Error + Send + Sync + 'static` types.
impl<T, E> IntoDeployerError<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S>(self, message: S) -> DeployerResult<T>
    where
        S: Into<String>,
    {
        self.map_err(|e| DeployerError::new_with_source_and_context(message, e))
    }
}

// Implement `IntoDeployerError` for options where `None` is converted into an error.
impl<T> IntoDeployerError<T> for std::option::Option<T> {
    fn context<S>(self, message: S) -> DeployerResult<T>
    where
        S: Into<String>,
    {
        self.ok_or_else(|| DeployerError::new_with_context(message))
    }
}
