//! Secret keys of the base public-key encryption scheme.

use crate::ciphertext::Ciphertext;
use crate::{Error, Message, PreParameters, Result};
use pre_math::rq::{Poly, PolyVec, Representation};
use pre_traits::{PkeDecrypter, PreParametrized, Serialize};
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Secret key s, a vector of k small polynomials.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SecretKey {
    /// The parameters
    pub(crate) par: Arc<PreParameters>,

    /// The vector s, in `Ntt` representation.
    pub(crate) s: PolyVec,
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.s.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    /// Returns the wire encoding bytes(s).
    pub fn to_raw_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.s.to_bytes())
    }

    /// Decode a secret key from its wire encoding.
    pub fn from_raw_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        if bytes.len() != par.secret_key_bytes() {
            return Err(Error::invalid_input_length(
                "secret key",
                par.secret_key_bytes(),
                bytes.len(),
            ));
        }
        Ok(Self {
            par: par.clone(),
            s: PolyVec::from_bytes(bytes, par.rank(), Representation::Ntt)?,
        })
    }

    /// Returns the parameters of the secret key.
    pub fn parameters(&self) -> &Arc<PreParameters> {
        &self.par
    }

    /// Compute s^T·u for a vector `u` in `PowerBasis` representation.
    ///
    /// The output is in `PowerBasis` representation.
    pub(crate) fn inner_product(&self, u: &PolyVec) -> Result<Zeroizing<Poly>> {
        let mut u_hat = u.clone();
        u_hat.change_representation(Representation::Ntt);
        let mut w = Zeroizing::new(self.s.dot_product(&u_hat)?);
        w.change_representation(Representation::PowerBasis);
        Ok(w)
    }
}

impl PreParametrized for SecretKey {
    type Parameters = PreParameters;
}

impl PkeDecrypter<Message, Ciphertext> for SecretKey {
    type Error = Error;

    fn try_decrypt(&self, ct: &Ciphertext) -> Result<Message> {
        if self.par != ct.par {
            return Err(Error::IncompatibleParameters);
        }
        let mut m = Zeroizing::new(&ct.v - &*self.inner_product(&ct.u)?);
        m.reduce();
        Ok(m.to_message())
    }
}
