//! Keys of the base public-key encryption scheme.

mod key_pair;
mod public_key;
mod secret_key;

pub use key_pair::KeyPair;
pub use public_key::PublicKey;
pub use secret_key::SecretKey;

use crate::{Error, Result, COINS_BYTES};
use rand::{CryptoRng, RngCore};
use sha3::{Digest, Sha3_512};
use zeroize::Zeroizing;

/// Split SHA3-512(input) into a public half and a secret half.
pub(crate) fn hash_g(input: &[u8]) -> ([u8; 32], Zeroizing<[u8; 32]>) {
    let mut digest = Sha3_512::digest(input);
    let mut public = [0u8; 32];
    let mut secret = Zeroizing::new([0u8; 32]);
    public.copy_from_slice(&digest[..32]);
    secret.copy_from_slice(&digest[32..]);
    digest.as_mut_slice().fill(0);
    (public, secret)
}

/// Draw fresh coins from `rng`.
pub(crate) fn random_coins<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<Zeroizing<[u8; COINS_BYTES]>> {
    let mut coins = Zeroizing::new([0u8; COINS_BYTES]);
    rng.try_fill_bytes(coins.as_mut())
        .map_err(|e| Error::InsufficientRandomness(e.to_string()))?;
    Ok(coins)
}
