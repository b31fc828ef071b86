//! Key pairs of the base public-key encryption scheme.

use crate::{PreParameters, Result, COINS_BYTES};
use pre_math::rq::{Matrix, NonceCounter, PolyVec, Representation};
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

use super::{hash_g, random_coins, PublicKey, SecretKey};

/// A public key and its secret key.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct KeyPair {
    pk: PublicKey,
    sk: SecretKey,
}

impl KeyPair {
    /// Derive a key pair deterministically from 32 bytes of coins.
    ///
    /// (ρ, σ) = SHA3-512(coins); the matrix A is expanded from ρ, and s and e
    /// are sampled from σ with the nonces 0..2k.
    pub fn derive(par: &Arc<PreParameters>, coins: &[u8; COINS_BYTES]) -> Result<Self> {
        let k = par.rank();
        let (seed, noise_seed) = hash_g(coins);
        let a = Matrix::generate(&seed, k, false)?;

        let mut counter = NonceCounter::new();
        let mut s = PolyVec::small(&noise_seed, &mut counter, k, par.eta1())?;
        let mut e = Zeroizing::new(PolyVec::small(&noise_seed, &mut counter, k, par.eta1())?);
        s.change_representation(Representation::Ntt);
        e.change_representation(Representation::Ntt);

        let mut t = a.mul_vec(&s)?;
        t.change_representation(Representation::Ntt);
        t += &*e;
        t.reduce();

        debug!(
            security_level = ?par.security_level(),
            public_key_bytes = par.public_key_bytes(),
            "derived key pair"
        );
        Ok(Self {
            pk: PublicKey {
                par: par.clone(),
                t,
                seed,
            },
            sk: SecretKey {
                par: par.clone(),
                s,
            },
        })
    }

    /// Generate a random key pair, drawing the coins from `rng`.
    pub fn random<R: RngCore + CryptoRng>(par: &Arc<PreParameters>, rng: &mut R) -> Result<Self> {
        let coins = random_coins(rng)?;
        Self::derive(par, &coins)
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// Returns the secret key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.sk
    }

    /// Split the key pair into its two keys.
    pub fn into_parts(self) -> (PublicKey, SecretKey) {
        (self.pk, self.sk)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyPair;
    use crate::PreParameters;
    use pre_math::rq::{Matrix, PolyVec, Representation};
    use rand::thread_rng;
    use std::error::Error as StdError;

    #[test]
    fn derive_is_deterministic() -> Result<(), Box<dyn StdError>> {
        for rank in 2..=4 {
            let par = PreParameters::default_arc(rank);
            let kp = KeyPair::derive(&par, &[4u8; 32])?;
            assert_eq!(KeyPair::derive(&par, &[4u8; 32])?, kp);
            assert_ne!(KeyPair::derive(&par, &[5u8; 32])?, kp);
        }
        Ok(())
    }

    #[test]
    fn public_key_relation() -> Result<(), Box<dyn StdError>> {
        // t - A·s is small.
        let par = PreParameters::default_arc(3);
        let (pk, sk) = KeyPair::random(&par, &mut thread_rng())?.into_parts();
        let a = Matrix::generate(pk.seed(), 3, false)?;

        let mut e: PolyVec = a.mul_vec(&sk.s)?;
        e.change_representation(Representation::Ntt);
        let mut t = pk.t.clone();
        t -= &e;
        t.change_representation(Representation::PowerBasis);
        t.reduce();
        for p in t.iter() {
            assert!(p
                .coefficients()
                .iter()
                .all(|c| *c <= par.eta1() as i16 || *c >= 3329 - par.eta1() as i16));
        }
        Ok(())
    }
}
