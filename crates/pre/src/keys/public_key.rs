//! Public keys of the base public-key encryption scheme.

use crate::ciphertext::Ciphertext;
use crate::parameters::SEED_BYTES;
use crate::proto::pre::PublicKey as PublicKeyProto;
use crate::{Error, Message, PreParameters, Result, COINS_BYTES};
use pre_math::rq::{Matrix, NonceCounter, Poly, PolyVec, Representation};
use pre_traits::{DeserializeParametrized, PkeEncrypter, PreParametrized, Serialize};
use prost::Message as _;
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use tracing::trace;
use zeroize::Zeroizing;

use super::random_coins;

/// Public key (t, ρ), where t = A·s + e and A is expanded from the seed ρ.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PublicKey {
    /// The parameters
    pub(crate) par: Arc<PreParameters>,

    /// The vector t, in `Ntt` representation.
    pub(crate) t: PolyVec,

    /// The seed ρ of the public matrix.
    pub(crate) seed: [u8; SEED_BYTES],
}

impl PublicKey {
    /// Returns the wire encoding bytes(t) ‖ ρ.
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        let mut bytes = self.t.to_bytes();
        bytes.extend_from_slice(&self.seed);
        bytes
    }

    /// Decode a public key from its wire encoding.
    pub fn from_raw_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        if bytes.len() != par.public_key_bytes() {
            return Err(Error::invalid_input_length(
                "public key",
                par.public_key_bytes(),
                bytes.len(),
            ));
        }
        let (t_bytes, seed_bytes) = bytes.split_at(par.polyvec_bytes());
        let t = PolyVec::from_bytes(t_bytes, par.rank(), Representation::Ntt)?;
        let mut seed = [0u8; SEED_BYTES];
        seed.copy_from_slice(seed_bytes);
        Ok(Self {
            par: par.clone(),
            t,
            seed,
        })
    }

    /// Returns the seed of the public matrix.
    pub fn seed(&self) -> &[u8; SEED_BYTES] {
        &self.seed
    }

    /// Returns the parameters of the public key.
    pub fn parameters(&self) -> &Arc<PreParameters> {
        &self.par
    }

    /// Compute (A^T·r, t^T·r) for a vector `r` in `Ntt` representation.
    ///
    /// Both outputs are in `PowerBasis` representation and not reduced.
    pub(crate) fn mask(&self, r: &PolyVec) -> Result<(PolyVec, Poly)> {
        let at = Matrix::generate(&self.seed, self.par.rank(), true)?;
        let mut u = at.mul_vec(r)?;
        u.change_representation(Representation::PowerBasis);
        let mut v = self.t.dot_product(r)?;
        v.change_representation(Representation::PowerBasis);
        Ok((u, v))
    }

    /// Sample the masking vector r ← CBD_η1 from `coins`, in `Ntt`
    /// representation.
    pub(crate) fn sample_r(
        &self,
        coins: &[u8; COINS_BYTES],
        counter: &mut NonceCounter,
    ) -> Result<Zeroizing<PolyVec>> {
        let mut r = Zeroizing::new(PolyVec::small(
            coins,
            counter,
            self.par.rank(),
            self.par.eta1(),
        )?);
        r.change_representation(Representation::Ntt);
        Ok(r)
    }
}

impl PreParametrized for PublicKey {
    type Parameters = PreParameters;
}

impl PkeEncrypter<Message, Ciphertext> for PublicKey {
    type Error = Error;

    fn try_encrypt_with_coins(
        &self,
        msg: &Message,
        coins: &[u8; COINS_BYTES],
    ) -> Result<Ciphertext> {
        trace!(rank = self.par.rank(), "encrypting");
        let mut counter = NonceCounter::new();
        let r = self.sample_r(coins, &mut counter)?;
        let e1 = Zeroizing::new(PolyVec::small(
            coins,
            &mut counter,
            self.par.rank(),
            self.par.eta2(),
        )?);
        let e2 = Zeroizing::new(Poly::small(coins, counter.next()?, self.par.eta2()));
        let m = Zeroizing::new(Poly::from_message(msg));

        let (mut u, mut v) = self.mask(&r)?;
        u += &*e1;
        v += &*e2;
        v += &*m;
        u.reduce();
        v.reduce();

        Ciphertext::compressing(&self.par, &u, &v)
    }

    fn try_encrypt<R: RngCore + CryptoRng>(
        &self,
        msg: &Message,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        let coins = random_coins(rng)?;
        self.try_encrypt_with_coins(msg, &coins)
    }
}

impl Serialize for PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        PublicKeyProto {
            rank: self.par.rank() as u32,
            bytes: self.to_raw_bytes(),
        }
        .encode_to_vec()
    }
}

impl DeserializeParametrized for PublicKey {
    type Error = Error;

    fn from_bytes(bytes: &[u8], par: &Arc<Self::Parameters>) -> Result<Self> {
        let proto = PublicKeyProto::decode(bytes).map_err(|_| Error::SerializationError)?;
        if proto.rank as usize != par.rank() {
            return Err(Error::IncompatibleParameters);
        }
        Self::from_raw_bytes(&proto.bytes, par)
    }
}
