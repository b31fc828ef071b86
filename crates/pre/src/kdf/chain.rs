//! Forward-only chain of epoch keys.

use super::{kdf, Key, KEY_BYTES};
use crate::Result;
use tracing::trace;
use zeroize::Zeroizing;

/// A chain of epoch keys: (sek_e, dk_{e+1}) = kdf(dk_e, e).
///
/// Whoever holds dk_e derives the keys of epoch e and of every later epoch,
/// but none of the earlier ones.
#[derive(Debug, Clone)]
pub struct KdfChain {
    epoch: u64,
    dk: Key,
}

impl KdfChain {
    /// Starts a chain at epoch 0 from the root derivation key.
    pub fn new(root: &[u8; KEY_BYTES]) -> Self {
        Self::starting_at(0, root)
    }

    /// Resumes a chain at `epoch` from the derivation key dk_epoch.
    pub fn starting_at(epoch: u64, dk: &[u8; KEY_BYTES]) -> Self {
        Self {
            epoch,
            dk: Zeroizing::new(*dk),
        }
    }

    /// The epoch whose key the next call to [`KdfChain::advance`] returns.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The current derivation key dk_epoch, to hand to a subscriber of this
    /// and every later epoch.
    pub fn derivation_key(&self) -> &[u8; KEY_BYTES] {
        &self.dk
    }

    /// Returns the epoch and key of the current epoch and moves to the next.
    pub fn advance(&mut self) -> Result<(u64, Key)> {
        let (sek, dk) = kdf(&self.dk[..], self.epoch)?;
        let epoch = self.epoch;
        trace!(epoch, "advancing key chain");
        self.dk = dk;
        self.epoch += 1;
        Ok((epoch, sek))
    }

    /// Skip forward to `epoch`. Does nothing if the chain is already past it.
    pub fn fast_forward(&mut self, epoch: u64) -> Result<()> {
        while self.epoch < epoch {
            self.advance()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::KdfChain;
    use crate::kdf::kdf;
    use std::error::Error as StdError;

    #[test]
    fn follows_kdf() -> Result<(), Box<dyn StdError>> {
        let root = [1u8; 16];
        let mut chain = KdfChain::new(&root);

        let (sek0, dk1) = kdf(&root, 0)?;
        let (sek1, _) = kdf(&dk1[..], 1)?;
        assert_eq!(chain.advance()?, (0, sek0));
        assert_eq!(chain.derivation_key(), &*dk1);
        assert_eq!(chain.advance()?, (1, sek1));
        assert_eq!(chain.epoch(), 2);
        Ok(())
    }

    #[test]
    fn subscriber_catches_up() -> Result<(), Box<dyn StdError>> {
        let mut owner = KdfChain::new(&[9u8; 16]);
        owner.fast_forward(5)?;
        let mut subscriber = KdfChain::starting_at(owner.epoch(), owner.derivation_key());

        for _ in 0..10 {
            assert_eq!(owner.advance()?, subscriber.advance()?);
        }

        // Fast-forwarding backwards does nothing.
        subscriber.fast_forward(3)?;
        assert_eq!(subscriber.epoch(), 15);
        Ok(())
    }
}
