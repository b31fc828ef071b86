//! Ciphertexts of the base public-key encryption scheme.

use crate::proto::pre::Ciphertext as CiphertextProto;
use crate::{Error, PreParameters, Result};
use pre_math::rq::{compressed_size, Poly, PolyVec};
use pre_traits::{DeserializeParametrized, PreParametrized, Serialize};
use prost::Message;
use std::sync::Arc;

/// A ciphertext (u, v), where u is a vector of k polynomials and v a
/// polynomial.
///
/// The components are kept in decompressed form: a ciphertext always equals
/// the decoding of its own wire bytes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Ciphertext {
    /// The parameters of the ciphertext.
    pub(crate) par: Arc<PreParameters>,

    /// The vector u, in `PowerBasis` representation.
    pub(crate) u: PolyVec,

    /// The polynomial v, in `PowerBasis` representation.
    pub(crate) v: Poly,
}

/// Compress (u, v) into the ciphertext wire format.
pub(crate) fn pack(par: &PreParameters, u: &PolyVec, v: &Poly) -> Vec<u8> {
    let mut bytes = u.compress(par.du());
    bytes.extend(v.compress(par.dv()));
    bytes
}

/// Decompress bytes in the ciphertext wire format, `name` identifying the
/// input in errors.
pub(crate) fn unpack(
    bytes: &[u8],
    par: &PreParameters,
    name: &'static str,
) -> Result<(PolyVec, Poly)> {
    if bytes.len() != par.ciphertext_bytes() {
        return Err(Error::invalid_input_length(
            name,
            par.ciphertext_bytes(),
            bytes.len(),
        ));
    }
    let (u_bytes, v_bytes) = bytes.split_at(par.rank() * compressed_size(par.du()));
    let u = PolyVec::decompress(u_bytes, par.rank(), par.du())?;
    let v = Poly::decompress(v_bytes, par.dv())?;
    Ok((u, v))
}

impl Ciphertext {
    /// Build a ciphertext from uncompressed components in `PowerBasis`
    /// representation, applying the lossy compression of the wire format.
    pub(crate) fn compressing(par: &Arc<PreParameters>, u: &PolyVec, v: &Poly) -> Result<Self> {
        Self::from_raw_bytes(&pack(par, u, v), par)
    }

    /// Returns the wire encoding Compress(u, du) ‖ Compress(v, dv).
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        pack(&self.par, &self.u, &self.v)
    }

    /// Decode a ciphertext from its wire encoding.
    pub fn from_raw_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        let (u, v) = unpack(bytes, par, "ciphertext")?;
        Ok(Self {
            par: par.clone(),
            u,
            v,
        })
    }

    /// Returns the parameters of the ciphertext.
    pub fn parameters(&self) -> &Arc<PreParameters> {
        &self.par
    }
}

impl PreParametrized for Ciphertext {
    type Parameters = PreParameters;
}

impl Serialize for Ciphertext {
    fn to_bytes(&self) -> Vec<u8> {
        CiphertextProto {
            rank: self.par.rank() as u32,
            bytes: self.to_raw_bytes(),
        }
        .encode_to_vec()
    }
}

impl DeserializeParametrized for Ciphertext {
    type Error = Error;

    fn from_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        let proto: CiphertextProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        if proto.rank as usize != par.rank() {
            return Err(Error::IncompatibleParameters);
        }
        Self::from_raw_bytes(&proto.bytes, par)
    }
}

#[cfg(test)]
mod tests {
    use super::{pack, unpack, Ciphertext};
    use crate::{Error, KeyPair, PreParameters};
    use pre_traits::{DeserializeParametrized, PkeEncrypter, Serialize};
    use rand::{thread_rng, RngCore};
    use std::error::Error as StdError;

    #[test]
    fn raw_bytes() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        for rank in 2..=4 {
            let par = PreParameters::default_arc(rank);
            let kp = KeyPair::random(&par, &mut rng)?;
            let ct = kp.public_key().try_encrypt(&[3u8; 32], &mut rng)?;

            let bytes = ct.to_raw_bytes();
            assert_eq!(bytes.len(), par.ciphertext_bytes());
            assert_eq!(Ciphertext::from_raw_bytes(&bytes, &par)?, ct);

            // Decoding any well-sized buffer and encoding it back is the
            // identity.
            let mut random = vec![0u8; par.ciphertext_bytes()];
            rng.fill_bytes(&mut random);
            let (u, v) = unpack(&random, &par, "ciphertext")?;
            assert_eq!(pack(&par, &u, &v), random);
        }
        Ok(())
    }

    #[test]
    fn lengths() {
        let par = PreParameters::default_arc(2);
        assert_eq!(
            Ciphertext::from_raw_bytes(&[0u8; 767], &par),
            Err(Error::invalid_input_length("ciphertext", 768, 767))
        );
        assert_eq!(
            unpack(&[0u8; 1088], &par, "re-encryption key"),
            Err(Error::invalid_input_length("re-encryption key", 768, 1088))
        );
    }

    #[test]
    fn serialize() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let par = PreParameters::default_arc(3);
        let kp = KeyPair::random(&par, &mut rng)?;
        let ct = kp.public_key().try_encrypt(&[1u8; 32], &mut rng)?;

        let bytes = ct.to_bytes();
        assert_eq!(Ciphertext::from_bytes(&bytes, &par)?, ct);
        assert_eq!(
            Ciphertext::from_bytes(&bytes, &PreParameters::default_arc(4)),
            Err(Error::IncompatibleParameters)
        );
        assert_eq!(
            Ciphertext::from_bytes(&[0xff; 3], &par),
            Err(Error::SerializationError)
        );
        Ok(())
    }
}
