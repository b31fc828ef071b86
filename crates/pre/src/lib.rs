#![crate_name = "pre"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Lattice-based proxy re-encryption.
//!
//! The library builds on an IND-CPA public-key encryption scheme over module
//! lattices (Kyber-style, with rank k ∈ {2, 3, 4}) and provides:
//!
//! - [`cdpre`]: ciphertext-dependent proxy re-encryption, where the delegator
//!   derives a re-encryption key bound to one ciphertext and a proxy turns that
//!   ciphertext into one decryptable by the delegatee;
//! - [`satopre`]: the key material and noise sampling of a ciphertext-independent
//!   scheme whose re-encryption is not available yet;
//! - [`kdf`]: the epoch key derivation used to grant subscribers access to a
//!   range of epochs.
//!
//! ```
//! use pre::{KeyPair, PreParametersBuilder, SecurityLevel};
//! use pre_traits::{PkeDecrypter, PkeEncrypter, ReEncrypter, ReKeyGenerator};
//! use rand::thread_rng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let par = PreParametersBuilder::new()
//!     .set_security_level(SecurityLevel::Pre768)
//!     .build_arc()?;
//! let mut rng = thread_rng();
//! let alice = KeyPair::random(&par, &mut rng)?;
//! let bob = KeyPair::random(&par, &mut rng)?;
//!
//! let msg = [42u8; 32];
//! let ct = alice.public_key().try_encrypt(&msg, &mut rng)?;
//! let rk = alice
//!     .secret_key()
//!     .try_generate_rekey(bob.public_key(), &ct, &[7u8; 32])?;
//! let ct_bob = rk.try_reencrypt(&ct)?;
//! assert_eq!(bob.secret_key().try_decrypt(&ct_bob)?, msg);
//! # Ok(())
//! # }
//! ```

mod ciphertext;
mod errors;
mod keys;
mod parameters;

pub mod cdpre;
pub mod kdf;
pub mod proto;
pub mod satopre;

pub use ciphertext::Ciphertext;
pub use errors::{Error, ParametersError, Result};
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use parameters::{NoiseDistribution, PreParameters, PreParametersBuilder, SecurityLevel};

/// Length in bytes of the messages encrypted by the scheme.
pub const MESSAGE_BYTES: usize = pre_math::rq::MSG_BYTES;

/// Length in bytes of the random coins consumed by key generation, encryption
/// and re-key generation.
pub const COINS_BYTES: usize = 32;

/// A 32-byte message.
pub type Message = [u8; MESSAGE_BYTES];
