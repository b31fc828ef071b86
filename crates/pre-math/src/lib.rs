#![crate_name = "pre_math"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Mathematical utilities for the pre library: arithmetic modulo q = 3329,
//! the number-theoretic transform over Z_q[x]/(x^256 + 1), polynomials and
//! polynomial vectors, and the samplers for uniform matrices and small noise.

pub mod ntt;
pub mod rq;
pub mod xof;
pub mod zq;

use rq::Representation;
use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that an error from an underlying computation occurred.
    #[error("{0}")]
    Default(String),

    /// Indicates an incorrect representation.
    #[error("Incorrect representation: got {0:?}, expected {1:?}")]
    IncorrectRepresentation(Representation, Representation),

    /// Indicates that a byte stream ran dry before a sampler completed.
    #[error("The byte stream was exhausted before sampling completed")]
    SamplerStarvation,

    /// Indicates that a buffer does not have the expected length.
    #[error("Invalid length: expected {0} bytes, got {1}")]
    InvalidLength(usize, usize),

    /// Indicates that a nonce counter would wrap around.
    #[error("The nonce counter is exhausted")]
    NonceExhausted,
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::rq::Representation;

    #[test]
    fn error_strings() {
        assert_eq!(
            Error::IncorrectRepresentation(Representation::PowerBasis, Representation::Ntt)
                .to_string(),
            "Incorrect representation: got PowerBasis, expected Ntt"
        );
        assert_eq!(
            Error::InvalidLength(384, 12).to_string(),
            "Invalid length: expected 384 bytes, got 12"
        );
        assert_eq!(
            Error::NonceExhausted.to_string(),
            "The nonce counter is exhausted"
        );
        assert_eq!(
            Error::SamplerStarvation.to_string(),
            "The byte stream was exhausted before sampling completed"
        );
    }
}
