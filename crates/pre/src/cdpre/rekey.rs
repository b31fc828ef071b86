//! Re-encryption keys.

use crate::ciphertext::{pack, unpack, Ciphertext};
use crate::proto::pre::ReKey as ReKeyProto;
use crate::{Error, PreParameters, PublicKey, Result, SecretKey, COINS_BYTES};
use pre_math::rq::{NonceCounter, Poly, PolyVec};
use pre_traits::{
    DeserializeParametrized, PreParametrized, ReEncrypter, ReKeyGenerator, Serialize,
};
use prost::Message;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// A re-encryption key (u_δ, v_δ), bound to one source ciphertext and one
/// delegatee. It has the shape and wire format of a ciphertext.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ReKey {
    pub(crate) par: Arc<PreParameters>,

    /// u_δ, in `PowerBasis` representation.
    pub(crate) u: PolyVec,

    /// v_δ, in `PowerBasis` representation.
    pub(crate) v: Poly,
}

impl ReKey {
    /// Returns the wire encoding Compress(u_δ, du) ‖ Compress(v_δ, dv).
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        pack(&self.par, &self.u, &self.v)
    }

    /// Decode a re-encryption key from its wire encoding.
    pub fn from_raw_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        let (u, v) = unpack(bytes, par, "re-encryption key")?;
        Ok(Self {
            par: par.clone(),
            u,
            v,
        })
    }

    /// Returns the parameters of the re-encryption key.
    pub fn parameters(&self) -> &Arc<PreParameters> {
        &self.par
    }
}

impl PreParametrized for ReKey {
    type Parameters = PreParameters;
}

impl ReKeyGenerator<PublicKey, Ciphertext, ReKey> for SecretKey {
    type Error = Error;

    fn try_generate_rekey(
        &self,
        pk: &PublicKey,
        ct: &Ciphertext,
        coins: &[u8; COINS_BYTES],
    ) -> Result<ReKey> {
        if self.par != pk.par || self.par != ct.par {
            return Err(Error::IncompatibleParameters);
        }

        // Nonces 0..k for r, k..2k for e.
        let mut counter = NonceCounter::new();
        let r = pk.sample_r(coins, &mut counter)?;
        let (mut u, v_mask) = pk.mask(&r)?;
        let e = Zeroizing::new(PolyVec::small(
            coins,
            &mut counter,
            self.par.rank(),
            self.par.eta2(),
        )?);
        u += &*e;
        u.reduce();

        let mut v = &v_mask - &*self.inner_product(&ct.u)?;
        v.reduce();

        let bytes = pack(&self.par, &u, &v);
        debug!(
            security_level = ?self.par.security_level(),
            rekey_bytes = bytes.len(),
            "generated re-encryption key"
        );
        ReKey::from_raw_bytes(&bytes, &self.par)
    }
}

impl ReEncrypter<Ciphertext> for ReKey {
    type Error = Error;

    fn try_reencrypt(&self, ct: &Ciphertext) -> Result<Ciphertext> {
        if self.par != ct.par {
            return Err(Error::IncompatibleParameters);
        }
        let mut v = &ct.v + &self.v;
        v.reduce();
        debug!(security_level = ?self.par.security_level(), "re-encrypted ciphertext");
        Ciphertext::compressing(&self.par, &self.u, &v)
    }
}

impl Serialize for ReKey {
    fn to_bytes(&self) -> Vec<u8> {
        ReKeyProto {
            rank: self.par.rank() as u32,
            bytes: self.to_raw_bytes(),
        }
        .encode_to_vec()
    }
}

impl DeserializeParametrized for ReKey {
    type Error = Error;

    fn from_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        let proto: ReKeyProto = Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        if proto.rank as usize != par.rank() {
            return Err(Error::IncompatibleParameters);
        }
        Self::from_raw_bytes(&proto.bytes, par)
    }
}

#[cfg(test)]
mod tests {
    use super::ReKey;
    use crate::{Error, KeyPair, PreParameters};
    use pre_traits::{DeserializeParametrized, PkeEncrypter, ReKeyGenerator, Serialize};
    use rand::thread_rng;
    use std::error::Error as StdError;

    #[test]
    fn serialize() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        for rank in 2..=4 {
            let par = PreParameters::default_arc(rank);
            let alice = KeyPair::random(&par, &mut rng)?;
            let bob = KeyPair::random(&par, &mut rng)?;
            let ct = alice.public_key().try_encrypt(&[0u8; 32], &mut rng)?;
            let rk = alice
                .secret_key()
                .try_generate_rekey(bob.public_key(), &ct, &[1u8; 32])?;

            assert_eq!(rk.to_raw_bytes().len(), par.rekey_bytes());
            assert_eq!(ReKey::from_bytes(&rk.to_bytes(), &par)?, rk);
        }

        let par = PreParameters::default_arc(2);
        let bytes = [0u8; 768];
        let rk = ReKey::from_raw_bytes(&bytes, &par)?;
        assert_eq!(
            ReKey::from_bytes(&rk.to_bytes(), &PreParameters::default_arc(3)),
            Err(Error::IncompatibleParameters)
        );
        Ok(())
    }
}
