//! Ciphertext-independent proxy re-encryption over dual identities.
//!
//! Every party holds two independent key pairs, and the re-encryption key
//! towards a delegatee only involves the public material of the delegatee's
//! second sub-key. This module provides the dual keys and the randomness of
//! the re-key generation:
//!
//! - two k × kℓ noise matrices R1 ← CBD_η1 and R2 ← CBD_η2, with ℓ = 12;
//! - U = A_j^T·R1 + R2 and w = t_j^T·R1, computed from the second public key
//!   of j.
//!
//! How (U, w) combine with the delegator's secret key into a re-encryption key
//! is not settled, so [`rkg`], [`renc`] and the [`ReKeyGenerator`]
//! implementation of [`DualSecretKey`] return [`Error::NotImplemented`].

mod keys;
mod noise;

pub use keys::{DualKeyPair, DualPublicKey, DualSecretKey};
pub use noise::{NoiseMatrix, NOISE_MATRIX_COLUMNS};

use crate::cdpre::ReKey;
use crate::keys::hash_g;
use crate::{Ciphertext, Error, NoiseDistribution, PreParameters, Result, COINS_BYTES};
use itertools::izip;
use ndarray::Array2;
use pre_math::rq::{Matrix, NonceCounter, Poly, PolyVec, Representation};
use pre_traits::ReKeyGenerator;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// The masked components (U, w) of a dual re-key generation.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MaskedComponents {
    /// U = A^T·R1 + R2, as a k × ℓ array of column vectors in `PowerBasis`
    /// representation.
    pub u: Array2<PolyVec>,

    /// w = t^T·R1, as a k × ℓ array of polynomials in `PowerBasis`
    /// representation.
    pub w: Array2<Poly>,
}

impl DualSecretKey {
    /// Compute the masked components towards the dual public key `pk_j`.
    ///
    /// (seed1, seed2) = SHA3-512(coins); R1 is sampled from seed1 and R2 from
    /// seed2, each with its own nonce counter.
    pub fn masked_components(
        &self,
        pk_j: &DualPublicKey,
        coins: &[u8; COINS_BYTES],
    ) -> Result<MaskedComponents> {
        let par = self.parameters();
        if par != pk_j.parameters() {
            return Err(Error::IncompatibleParameters);
        }
        let k = par.rank();
        let (_, pk2) = pk_j.split();

        let (seed1, seed2) = hash_g(coins);
        let seed1 = Zeroizing::new(seed1);
        let mut r1 = NoiseMatrix::sample(
            par,
            &seed1,
            NoiseDistribution::Eta1,
            &mut NonceCounter::new(),
        )?;
        r1.change_representation(Representation::Ntt);
        let r2 = NoiseMatrix::sample(
            par,
            &seed2,
            NoiseDistribution::Eta2,
            &mut NonceCounter::new(),
        )?;

        let at = Matrix::generate(pk2.seed(), k, true)?;
        let mut u = Vec::with_capacity(r1.entries().len());
        let mut w = Vec::with_capacity(r1.entries().len());
        for (column, noise) in izip!(r1.entries(), r2.entries()) {
            let mut ui = at.mul_vec(column)?;
            ui.change_representation(Representation::PowerBasis);
            ui += noise;
            ui.reduce();
            u.push(ui);

            let mut wi = pk2.t.dot_product(column)?;
            wi.change_representation(Representation::PowerBasis);
            wi.reduce();
            w.push(wi);
        }

        let shape = r1.entries().dim();
        debug!(
            security_level = ?par.security_level(),
            columns = k * NOISE_MATRIX_COLUMNS,
            "computed masked components"
        );
        Ok(MaskedComponents {
            u: Array2::from_shape_vec(shape, u)
                .map_err(|e| Error::DefaultError(e.to_string()))?,
            w: Array2::from_shape_vec(shape, w)
                .map_err(|e| Error::DefaultError(e.to_string()))?,
        })
    }
}

impl ReKeyGenerator<DualPublicKey, Ciphertext, ReKey> for DualSecretKey {
    type Error = Error;

    fn try_generate_rekey(
        &self,
        pk: &DualPublicKey,
        _ct: &Ciphertext,
        _coins: &[u8; COINS_BYTES],
    ) -> Result<ReKey> {
        if self.parameters() != pk.parameters() {
            return Err(Error::IncompatibleParameters);
        }
        Err(Error::not_implemented("SATOPRE re-key generation"))
    }
}

/// Re-key generation between dual identities, on wire encodings.
///
/// The inputs are validated, then [`Error::NotImplemented`] is returned.
pub fn rkg(
    par: &Arc<PreParameters>,
    sk_i: &[u8],
    pk_j: &[u8],
    _coins: &[u8; COINS_BYTES],
) -> Result<Vec<u8>> {
    DualSecretKey::from_raw_bytes(sk_i, par)?;
    DualPublicKey::from_raw_bytes(pk_j, par)?;
    Err(Error::not_implemented("SATOPRE re-key generation"))
}

/// Re-encryption between dual identities, on wire encodings.
///
/// Always returns [`Error::NotImplemented`].
pub fn renc(_par: &Arc<PreParameters>, _rk: &[u8], _c_i: &[u8]) -> Result<Vec<u8>> {
    Err(Error::not_implemented("SATOPRE re-encryption"))
}

#[cfg(test)]
mod tests {
    use super::{renc, rkg, DualKeyPair, NoiseMatrix, NOISE_MATRIX_COLUMNS};
    use crate::keys::hash_g;
    use crate::{Error, NoiseDistribution, PreParameters};
    use pre_math::rq::{Matrix, PolyVec, Representation};
    use pre_traits::{PkeEncrypter, ReKeyGenerator};
    use std::error::Error as StdError;

    #[test]
    fn masked_components() -> Result<(), Box<dyn StdError>> {
        for rank in 2..=4 {
            let par = PreParameters::default_arc(rank);
            let alice = DualKeyPair::derive(&par, &[1u8; 32], &[2u8; 32])?;
            let bob = DualKeyPair::derive(&par, &[3u8; 32], &[4u8; 32])?;

            let mc = alice
                .secret_key()
                .masked_components(bob.public_key(), &[5u8; 32])?;
            assert_eq!(mc.u.dim(), (rank, NOISE_MATRIX_COLUMNS));
            assert_eq!(mc.w.dim(), (rank, NOISE_MATRIX_COLUMNS));
            assert!(mc
                .u
                .iter()
                .all(|v| v.len() == rank && v.iter().all(|p| p.is_reduced())));
            assert!(mc.w.iter().all(|p| p.is_reduced()));

            assert_eq!(
                alice
                    .secret_key()
                    .masked_components(bob.public_key(), &[5u8; 32])?,
                mc
            );
            assert_ne!(
                alice
                    .secret_key()
                    .masked_components(bob.public_key(), &[6u8; 32])?,
                mc
            );
        }
        Ok(())
    }

    #[test]
    fn only_second_subkey_is_used() -> Result<(), Box<dyn StdError>> {
        let par = PreParameters::default_arc(2);
        let alice = DualKeyPair::derive(&par, &[1u8; 32], &[2u8; 32])?;
        let bob = DualKeyPair::derive(&par, &[3u8; 32], &[4u8; 32])?;
        let carol = DualKeyPair::derive(&par, &[9u8; 32], &[4u8; 32])?;

        let sk = alice.secret_key();
        assert_eq!(
            sk.masked_components(bob.public_key(), &[0u8; 32])?,
            sk.masked_components(carol.public_key(), &[0u8; 32])?
        );
        Ok(())
    }

    #[test]
    fn u_is_close_to_at_times_r1() -> Result<(), Box<dyn StdError>> {
        // U - A^T·R1 = R2 has coefficients bounded by η2.
        let par = PreParameters::default_arc(3);
        let alice = DualKeyPair::derive(&par, &[1u8; 32], &[2u8; 32])?;
        let bob = DualKeyPair::derive(&par, &[3u8; 32], &[4u8; 32])?;
        let coins = [7u8; 32];
        let mc = alice
            .secret_key()
            .masked_components(bob.public_key(), &coins)?;

        let (seed1, _) = hash_g(&coins);
        let r1 = NoiseMatrix::sample(
            &par,
            &seed1,
            NoiseDistribution::Eta1,
            &mut Default::default(),
        )?;
        let at = Matrix::generate(bob.public_key().split().1.seed(), 3, true)?;
        for (column, u) in r1.entries().iter().zip(mc.u.iter()) {
            let mut column: PolyVec = column.clone();
            column.change_representation(Representation::Ntt);
            let mut at_r1 = at.mul_vec(&column)?;
            at_r1.change_representation(Representation::PowerBasis);
            let mut diff = u.clone();
            diff -= &at_r1;
            diff.reduce();
            assert!(diff
                .iter()
                .all(|p| p.coefficients().iter().all(|c| *c <= 2 || *c >= 3327)));
        }
        Ok(())
    }

    #[test]
    fn gated_entry_points() -> Result<(), Box<dyn StdError>> {
        let par = PreParameters::default_arc(2);
        let alice = DualKeyPair::derive(&par, &[1u8; 32], &[2u8; 32])?;
        let bob = DualKeyPair::derive(&par, &[3u8; 32], &[4u8; 32])?;
        let ct = alice
            .public_key()
            .split()
            .0
            .try_encrypt_with_coins(&[0u8; 32], &[0u8; 32])?;

        assert!(matches!(
            alice
                .secret_key()
                .try_generate_rekey(bob.public_key(), &ct, &[0u8; 32]),
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(
            rkg(
                &par,
                &alice.secret_key().to_raw_bytes(),
                &bob.public_key().to_raw_bytes(),
                &[0u8; 32]
            ),
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(
            rkg(&par, &[0u8; 3], &bob.public_key().to_raw_bytes(), &[0u8; 32]),
            Err(Error::InvalidInputLength { .. })
        ));
        assert!(matches!(
            renc(&par, &[], &ct.to_raw_bytes()),
            Err(Error::NotImplemented(_))
        ));
        Ok(())
    }
}
