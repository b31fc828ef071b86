#![crate_name = "pre_traits"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Traits for lattice-based proxy re-encryption.

use rand::{CryptoRng, RngCore};
use std::sync::Arc;

/// The parameters of a proxy re-encryption deployment.
pub trait SchemeParameters {}

/// Indicates that an object is parametrized.
pub trait PreParametrized {
    /// The type of the parameters.
    type Parameters: SchemeParameters;
}

/// Encryption of a message into a ciphertext.
pub trait PkeEncrypter<M, C>: PreParametrized {
    /// The type of errors.
    type Error;

    /// Encrypt a message using explicit coins. Equal coins give equal
    /// ciphertexts.
    fn try_encrypt_with_coins(&self, msg: &M, coins: &[u8; 32]) -> Result<C, Self::Error>;

    /// Encrypt a message, drawing the coins from `rng`.
    fn try_encrypt<R: RngCore + CryptoRng>(&self, msg: &M, rng: &mut R) -> Result<C, Self::Error>;
}

/// Decryption of a ciphertext into a message.
pub trait PkeDecrypter<M, C>: PreParametrized {
    /// The type of errors.
    type Error;

    /// Attempt to decrypt a ciphertext.
    fn try_decrypt(&self, ct: &C) -> Result<M, Self::Error>;
}

/// Generation of a re-encryption key bound to one source ciphertext.
///
/// Implemented by the secret key of the delegating party; `P` is the public
/// key of the delegatee, `C` the ciphertext being delegated and `K` the
/// re-encryption key handed to the proxy.
pub trait ReKeyGenerator<P, C, K>: PreParametrized {
    /// The type of errors.
    type Error;

    /// Derive a re-encryption key from explicit coins.
    fn try_generate_rekey(&self, pk: &P, ct: &C, coins: &[u8; 32]) -> Result<K, Self::Error>;
}

/// Re-encryption of a ciphertext by a proxy holding no secret material.
pub trait ReEncrypter<C>: PreParametrized {
    /// The type of errors.
    type Error;

    /// Transform `ct` into a ciphertext for the delegatee.
    fn try_reencrypt(&self, ct: &C) -> Result<C, Self::Error>;
}

/// Serialization.
pub trait Serialize {
    /// Serialize `Self` into a vector of bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Deserialization of a parametrized value.
pub trait DeserializeParametrized
where
    Self: Sized,
    Self: PreParametrized,
{
    /// The type of error returned.
    type Error;

    /// Attempt to deserialize from a vector of bytes
    fn from_bytes(bytes: &[u8], par: &Arc<Self::Parameters>) -> Result<Self, Self::Error>;
}

/// Deserialization without context.
pub trait Deserialize
where
    Self: Sized,
{
    /// The type of error returned.
    type Error;

    /// Attempt to deserialize from a vector of bytes
    fn try_deserialize(bytes: &[u8]) -> Result<Self, Self::Error>;
}
