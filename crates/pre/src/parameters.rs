//! Create parameters for the proxy re-encryption schemes

use crate::proto::pre::Parameters as ParametersProto;
use crate::{Error, ParametersError, Result};
use pre_math::rq::{compressed_size, POLY_BYTES};
use pre_traits::{Deserialize, SchemeParameters, Serialize};
use prost::Message;
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::sync::Arc;

/// Length in bytes of the seed of the public matrix.
pub(crate) const SEED_BYTES: usize = 32;

/// The security levels, named after the dimension k·n of the module lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerdeSerialize, SerdeDeserialize)]
pub enum SecurityLevel {
    /// Module rank 2.
    Pre512,
    /// Module rank 3.
    Pre768,
    /// Module rank 4.
    Pre1024,
}

impl SecurityLevel {
    /// All the security levels, by increasing rank.
    pub const ALL: [SecurityLevel; 3] = [Self::Pre512, Self::Pre768, Self::Pre1024];

    /// Module rank k of this security level.
    pub const fn rank(&self) -> usize {
        match self {
            Self::Pre512 => 2,
            Self::Pre768 => 3,
            Self::Pre1024 => 4,
        }
    }
}

impl TryFrom<usize> for SecurityLevel {
    type Error = Error;

    fn try_from(rank: usize) -> Result<Self> {
        match rank {
            2 => Ok(Self::Pre512),
            3 => Ok(Self::Pre768),
            4 => Ok(Self::Pre1024),
            _ => Err(Error::ParametersError(ParametersError::InvalidRank(rank))),
        }
    }
}

/// Selects one of the two centered binomial distributions of a parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseDistribution {
    /// CBD_η1, for secrets, key errors and the encryption randomness.
    Eta1,
    /// CBD_η2, for the encryption and re-key errors.
    Eta2,
}

/// Parameters for the proxy re-encryption schemes.
#[derive(Debug, PartialEq, Eq)]
pub struct PreParameters {
    /// Module rank.
    rank: usize,

    /// Parameter of the first centered binomial distribution.
    eta1: usize,

    /// Parameter of the second centered binomial distribution.
    eta2: usize,

    /// Number of bits per compressed coefficient of u.
    du: usize,

    /// Number of bits per compressed coefficient of v.
    dv: usize,
}

impl SchemeParameters for PreParameters {}

impl PreParameters {
    /// Returns the module rank k.
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Returns the security level.
    pub const fn security_level(&self) -> SecurityLevel {
        match self.rank {
            2 => SecurityLevel::Pre512,
            3 => SecurityLevel::Pre768,
            _ => SecurityLevel::Pre1024,
        }
    }

    /// Returns η1.
    pub const fn eta1(&self) -> usize {
        self.eta1
    }

    /// Returns η2.
    pub const fn eta2(&self) -> usize {
        self.eta2
    }

    /// Returns the parameter of a noise distribution.
    pub const fn eta(&self, distribution: NoiseDistribution) -> usize {
        match distribution {
            NoiseDistribution::Eta1 => self.eta1,
            NoiseDistribution::Eta2 => self.eta2,
        }
    }

    /// Returns the compression width of u.
    pub const fn du(&self) -> usize {
        self.du
    }

    /// Returns the compression width of v.
    pub const fn dv(&self) -> usize {
        self.dv
    }

    /// Size in bytes of a serialized polynomial vector.
    pub const fn polyvec_bytes(&self) -> usize {
        self.rank * POLY_BYTES
    }

    /// Size in bytes of a raw public key.
    pub const fn public_key_bytes(&self) -> usize {
        self.polyvec_bytes() + SEED_BYTES
    }

    /// Size in bytes of a raw secret key.
    pub const fn secret_key_bytes(&self) -> usize {
        self.polyvec_bytes()
    }

    /// Size in bytes of a raw ciphertext.
    pub const fn ciphertext_bytes(&self) -> usize {
        self.rank * compressed_size(self.du) + compressed_size(self.dv)
    }

    /// Size in bytes of a raw re-encryption key, which has the shape of a
    /// ciphertext.
    pub const fn rekey_bytes(&self) -> usize {
        self.ciphertext_bytes()
    }

    #[cfg(test)]
    #[allow(missing_docs)]
    pub fn default_arc(rank: usize) -> Arc<Self> {
        PreParametersBuilder::new()
            .set_rank(rank)
            .build_arc()
            .unwrap()
    }
}

/// Builder for parameters for the proxy re-encryption schemes.
#[derive(Debug)]
pub struct PreParametersBuilder {
    rank: Option<usize>,
    security_level: Option<SecurityLevel>,
}

impl PreParametersBuilder {
    /// Creates a new instance of the builder
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            rank: None,
            security_level: None,
        }
    }

    /// Sets the module rank. Building fails unless the rank is 2, 3 or 4.
    pub fn set_rank(&mut self, rank: usize) -> &mut Self {
        self.rank = Some(rank);
        self
    }

    /// Sets the security level.
    pub fn set_security_level(&mut self, security_level: SecurityLevel) -> &mut Self {
        self.security_level = Some(security_level);
        self
    }

    /// Build a new `PreParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<PreParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `PreParameters`.
    pub fn build(&self) -> Result<PreParameters> {
        let rank = match (self.rank, self.security_level) {
            (None, None) => {
                return Err(Error::ParametersError(ParametersError::TooFewSpecified(
                    "One of `rank` and `security_level` must be specified".to_string(),
                )))
            }
            (Some(rank), Some(level)) if rank != level.rank() => {
                return Err(Error::ParametersError(ParametersError::TooManySpecified(
                    format!(
                        "The rank {} does not match the security level {:?}",
                        rank, level
                    ),
                )))
            }
            (Some(rank), _) => rank,
            (None, Some(level)) => level.rank(),
        };

        let (eta1, eta2, du, dv) = match rank {
            2 => (3, 2, 10, 4),
            3 => (2, 2, 10, 4),
            4 => (2, 2, 11, 5),
            _ => {
                return Err(Error::ParametersError(ParametersError::InvalidRank(
                    rank,
                )))
            }
        };

        Ok(PreParameters {
            rank,
            eta1,
            eta2,
            du,
            dv,
        })
    }
}

impl Serialize for PreParameters {
    fn to_bytes(&self) -> Vec<u8> {
        ParametersProto {
            rank: self.rank as u32,
        }
        .encode_to_vec()
    }
}

impl Deserialize for PreParameters {
    type Error = Error;

    fn try_deserialize(bytes: &[u8]) -> Result<Self> {
        let params: ParametersProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        PreParametersBuilder::new()
            .set_rank(params.rank as usize)
            .build()
    }
}
