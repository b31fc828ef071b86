//! Error types for the pre library.

use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that an error in the underlying mathematical library was
    /// encountered.
    #[error("{0}")]
    MathError(pre_math::Error),

    /// Indicates that an input buffer does not have the length required by the
    /// parameters.
    #[error("Invalid length for {name}: expected {expected} bytes, got {actual}")]
    InvalidInputLength {
        /// Which input was rejected.
        name: &'static str,
        /// The length required by the parameters.
        expected: usize,
        /// The length received.
        actual: usize,
    },

    /// Indicates that the random number generator failed to provide coins.
    #[error("Insufficient randomness: {0}")]
    InsufficientRandomness(String),

    /// Indicates that the operation is not available.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Indicates a parameter error.
    #[error("{0}")]
    ParametersError(ParametersError),

    /// Indicates that values built for different parameters were mixed.
    #[error("Incompatible parameters")]
    IncompatibleParameters,

    /// Indicates a serialization error.
    #[error("Serialization error")]
    SerializationError,

    /// Indicates a default error.
    #[error("{0}")]
    DefaultError(String),
}

impl From<pre_math::Error> for Error {
    fn from(e: pre_math::Error) -> Self {
        Error::MathError(e)
    }
}

impl From<ParametersError> for Error {
    fn from(e: ParametersError) -> Self {
        Error::ParametersError(e)
    }
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParametersError {
    /// Indicates that the module rank is not supported.
    #[error("Invalid rank: {0}, expected 2, 3 or 4")]
    InvalidRank(usize),

    /// Indicates that neither a rank nor a security level was specified.
    #[error("{0}")]
    TooFewSpecified(String),

    /// Indicates that a rank and a security level were specified and disagree.
    #[error("{0}")]
    TooManySpecified(String),
}

impl Error {
    /// Create an input length error.
    pub fn invalid_input_length(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidInputLength {
            name,
            expected,
            actual,
        }
    }

    /// Create an error for an operation that is not available.
    pub fn not_implemented<S: Into<String>>(operation: S) -> Self {
        Self::NotImplemented(operation.into())
    }
}
