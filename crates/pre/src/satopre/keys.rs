//! Dual key pairs: two independent key pairs acting as one identity.

use crate::proto::pre::DualPublicKey as DualPublicKeyProto;
use crate::{Error, KeyPair, PreParameters, PublicKey, Result, SecretKey, COINS_BYTES};
use pre_traits::{DeserializeParametrized, PreParametrized, Serialize};
use prost::Message;
use std::sync::Arc;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The public key pk1 ‖ pk2 of a dual identity.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DualPublicKey {
    pub(crate) pk1: PublicKey,
    pub(crate) pk2: PublicKey,
}

/// The secret key sk1 ‖ sk2 of a dual identity.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DualSecretKey {
    pub(crate) sk1: SecretKey,
    pub(crate) sk2: SecretKey,
}

/// A dual public key and its dual secret key.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DualKeyPair {
    pk: DualPublicKey,
    sk: DualSecretKey,
}

impl DualKeyPair {
    /// Derive the two sub-key pairs from two independent sets of coins.
    pub fn derive(
        par: &Arc<PreParameters>,
        coins1: &[u8; COINS_BYTES],
        coins2: &[u8; COINS_BYTES],
    ) -> Result<Self> {
        let (pk1, sk1) = KeyPair::derive(par, coins1)?.into_parts();
        let (pk2, sk2) = KeyPair::derive(par, coins2)?.into_parts();
        debug!(security_level = ?par.security_level(), "derived dual key pair");
        Ok(Self {
            pk: DualPublicKey { pk1, pk2 },
            sk: DualSecretKey { sk1, sk2 },
        })
    }

    /// Returns the dual public key.
    pub fn public_key(&self) -> &DualPublicKey {
        &self.pk
    }

    /// Returns the dual secret key.
    pub fn secret_key(&self) -> &DualSecretKey {
        &self.sk
    }
}

impl DualPublicKey {
    /// Assemble a dual public key from two public keys.
    pub fn concat(pk1: PublicKey, pk2: PublicKey) -> Result<Self> {
        if pk1.par != pk2.par {
            return Err(Error::IncompatibleParameters);
        }
        Ok(Self { pk1, pk2 })
    }

    /// Returns the two public keys.
    pub fn split(&self) -> (&PublicKey, &PublicKey) {
        (&self.pk1, &self.pk2)
    }

    /// Returns the wire encoding pk1 ‖ pk2.
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        let mut bytes = self.pk1.to_raw_bytes();
        bytes.extend(self.pk2.to_raw_bytes());
        bytes
    }

    /// Decode a dual public key from its wire encoding.
    pub fn from_raw_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        let size = par.public_key_bytes();
        if bytes.len() != 2 * size {
            return Err(Error::invalid_input_length(
                "dual public key",
                2 * size,
                bytes.len(),
            ));
        }
        let (b1, b2) = bytes.split_at(size);
        Ok(Self {
            pk1: PublicKey::from_raw_bytes(b1, par)?,
            pk2: PublicKey::from_raw_bytes(b2, par)?,
        })
    }

    /// Returns the parameters of the key.
    pub fn parameters(&self) -> &Arc<PreParameters> {
        &self.pk1.par
    }
}

impl DualSecretKey {
    /// Assemble a dual secret key from two secret keys.
    pub fn concat(sk1: SecretKey, sk2: SecretKey) -> Result<Self> {
        if sk1.par != sk2.par {
            return Err(Error::IncompatibleParameters);
        }
        Ok(Self { sk1, sk2 })
    }

    /// Returns the two secret keys.
    pub fn split(&self) -> (&SecretKey, &SecretKey) {
        (&self.sk1, &self.sk2)
    }

    /// Returns the wire encoding sk1 ‖ sk2.
    pub fn to_raw_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(Vec::with_capacity(2 * self.sk1.par.secret_key_bytes()));
        bytes.extend_from_slice(&self.sk1.to_raw_bytes());
        bytes.extend_from_slice(&self.sk2.to_raw_bytes());
        bytes
    }

    /// Decode a dual secret key from its wire encoding.
    pub fn from_raw_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        let size = par.secret_key_bytes();
        if bytes.len() != 2 * size {
            return Err(Error::invalid_input_length(
                "dual secret key",
                2 * size,
                bytes.len(),
            ));
        }
        let (b1, b2) = bytes.split_at(size);
        Ok(Self {
            sk1: SecretKey::from_raw_bytes(b1, par)?,
            sk2: SecretKey::from_raw_bytes(b2, par)?,
        })
    }

    /// Returns the parameters of the key.
    pub fn parameters(&self) -> &Arc<PreParameters> {
        &self.sk1.par
    }
}

impl Zeroize for DualSecretKey {
    fn zeroize(&mut self) {
        self.sk1.zeroize();
        self.sk2.zeroize();
    }
}

impl ZeroizeOnDrop for DualSecretKey {}

impl PreParametrized for DualPublicKey {
    type Parameters = PreParameters;
}

impl PreParametrized for DualSecretKey {
    type Parameters = PreParameters;
}

impl Serialize for DualPublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        DualPublicKeyProto {
            rank: self.pk1.par.rank() as u32,
            pk1: self.pk1.to_raw_bytes(),
            pk2: self.pk2.to_raw_bytes(),
        }
        .encode_to_vec()
    }
}

impl DeserializeParametrized for DualPublicKey {
    type Error = Error;

    fn from_bytes(bytes: &[u8], par: &Arc<PreParameters>) -> Result<Self> {
        let proto: DualPublicKeyProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        if proto.rank as usize != par.rank() {
            return Err(Error::IncompatibleParameters);
        }
        Ok(Self {
            pk1: PublicKey::from_raw_bytes(&proto.pk1, par)?,
            pk2: PublicKey::from_raw_bytes(&proto.pk2, par)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DualKeyPair, DualPublicKey, DualSecretKey};
    use crate::{Error, KeyPair, PreParameters};
    use pre_traits::{DeserializeParametrized, Serialize};
    use std::error::Error as StdError;

    #[test]
    fn derive() -> Result<(), Box<dyn StdError>> {
        let par = PreParameters::default_arc(3);
        let dual = DualKeyPair::derive(&par, &[1u8; 32], &[2u8; 32])?;
        let kp1 = KeyPair::derive(&par, &[1u8; 32])?;
        let kp2 = KeyPair::derive(&par, &[2u8; 32])?;

        assert_eq!(
            dual.public_key().split(),
            (kp1.public_key(), kp2.public_key())
        );
        assert_eq!(
            dual.secret_key().split(),
            (kp1.secret_key(), kp2.secret_key())
        );
        Ok(())
    }

    #[test]
    fn raw_bytes() -> Result<(), Box<dyn StdError>> {
        for rank in 2..=4 {
            let par = PreParameters::default_arc(rank);
            let dual = DualKeyPair::derive(&par, &[5u8; 32], &[6u8; 32])?;

            let pk = dual.public_key().to_raw_bytes();
            assert_eq!(pk.len(), 2 * par.public_key_bytes());
            assert_eq!(
                &pk[..par.public_key_bytes()],
                &dual.public_key().split().0.to_raw_bytes()[..]
            );
            assert_eq!(&DualPublicKey::from_raw_bytes(&pk, &par)?, dual.public_key());

            let sk = dual.secret_key().to_raw_bytes();
            assert_eq!(sk.len(), 2 * par.secret_key_bytes());
            assert_eq!(&DualSecretKey::from_raw_bytes(&sk, &par)?, dual.secret_key());

            assert!(matches!(
                DualPublicKey::from_raw_bytes(&pk[1..], &par),
                Err(Error::InvalidInputLength { .. })
            ));
            assert!(matches!(
                DualSecretKey::from_raw_bytes(&sk[..par.secret_key_bytes()], &par),
                Err(Error::InvalidInputLength { .. })
            ));
        }
        Ok(())
    }

    #[test]
    fn concat() -> Result<(), Box<dyn StdError>> {
        let par2 = PreParameters::default_arc(2);
        let par3 = PreParameters::default_arc(3);
        let (pk1, sk1) = KeyPair::derive(&par2, &[0u8; 32])?.into_parts();
        let (pk2, sk2) = KeyPair::derive(&par3, &[0u8; 32])?.into_parts();
        assert_eq!(
            DualPublicKey::concat(pk1.clone(), pk2),
            Err(Error::IncompatibleParameters)
        );
        assert_eq!(
            DualSecretKey::concat(sk1.clone(), sk2).err(),
            Some(Error::IncompatibleParameters)
        );
        let dual = DualPublicKey::concat(pk1.clone(), pk1.clone())?;
        assert_eq!(dual.split(), (&pk1, &pk1));
        assert!(DualSecretKey::concat(sk1.clone(), sk1).is_ok());
        Ok(())
    }

    #[test]
    fn serialize() -> Result<(), Box<dyn StdError>> {
        let par = PreParameters::default_arc(2);
        let dual = DualKeyPair::derive(&par, &[7u8; 32], &[8u8; 32])?;
        let bytes = dual.public_key().to_bytes();
        assert_eq!(&DualPublicKey::from_bytes(&bytes, &par)?, dual.public_key());
        assert_eq!(
            DualPublicKey::from_bytes(&bytes, &PreParameters::default_arc(4)),
            Err(Error::IncompatibleParameters)
        );
        Ok(())
    }
}
