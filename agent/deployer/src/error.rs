use crate::deployer::DeployerError;
use crate::OptionsError;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// This is the error type returned by an [`Agent`](crate::Agent) object. When receiving this error
/// type you will typically want to display it and exit your main function with a non-zero exit
/// code.
#[derive(Debug)]
pub enum AgentError {
    Options(OptionsError),
    Deployer(DeployerError),
}

/// The result type returned by an [`Agent`](crate::Agent) object.
pub type AgentResult<T> = std::result::Result<T, AgentError>;

impl AgentError {
    fn variant_name(&self) -> &'static str {
        match self {
            AgentError::Options(_) => "Options error",
            AgentError::Deployer(_) => "Deployer error",
        }
    }

    fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        match self {
            AgentError::Options(e) => e,
            AgentError::Deployer(e) => e,
        }
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.variant_name(), self.inner())
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner())
    }
}

impl From<OptionsError> for AgentError {
    fn from(e: OptionsError) -> Self {
        Self::Options(e)
    }
}

impl From<DeployerError> for AgentError {
    fn from(e: DeployerError) -> Self {
        Self::Deployer(e)
    }
}

/// This struct can serve as an `Error` type when you want to provide an error message, but have no
/// underlying error type. It allows a string to serve as an error. This can be useful for custom
/// (i.e. mock) implementations of the [`Deployer`](crate::Deployer).
///
/// # Example
///
/// ```
/// # use deployer::error::ErrorMessage;
/// // Create a std::error::Error from a string.
/// let _error: ErrorMessage = "Something bad happened".into();
/// ```
///
#[derive(Debug)]
pub struct ErrorMessage {
    message: String,
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.message, f)
    }
}

impl<S: Into<String>> From<S> for ErrorMessage {
    fn from(s: S) -> Self {
        Self { message: s.into() }
    }
}

impl std::error::Error for ErrorMessage {}
