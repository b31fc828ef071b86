//! Epoch key derivation.
//!
//! A data owner encrypts the data of epoch e under a symmetric key sek_e and
//! grants access to a range of epochs by handing out derivation keys, wrapped
//! in proxy re-encryption messages. Two derivations are provided:
//!
//! - [`KdfChain`], where a derivation key gives access to every later epoch;
//! - [`KdfTree`], where a set of tree nodes gives access to an arbitrary set of
//!   epochs.

mod chain;
mod tree;

pub use chain::KdfChain;
pub use tree::KdfTree;

use crate::{Error, Message, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

/// Length in bytes of the symmetric and derivation keys.
pub const KEY_BYTES: usize = 16;

/// A symmetric or derivation key.
pub type Key = Zeroizing<[u8; KEY_BYTES]>;

/// Derive two child keys from `parent`: HMAC-SHA256(parent, decimal(direction))
/// split into two halves.
pub fn kdf(parent: &[u8], direction: u64) -> Result<(Key, Key)> {
    let mut mac = Hmac::<Sha256>::new_from_slice(parent)
        .map_err(|e| Error::DefaultError(e.to_string()))?;
    mac.update(direction.to_string().as_bytes());
    let mut full = mac.finalize().into_bytes();

    let mut left = Zeroizing::new([0u8; KEY_BYTES]);
    let mut right = Zeroizing::new([0u8; KEY_BYTES]);
    left.copy_from_slice(&full[..KEY_BYTES]);
    right.copy_from_slice(&full[KEY_BYTES..]);
    full.as_mut_slice().zeroize();
    Ok((left, right))
}

/// Encode a key as a message: the key followed by zeros.
pub fn key_to_message(key: &[u8; KEY_BYTES]) -> Zeroizing<Message> {
    let mut msg = Zeroizing::new([0u8; crate::MESSAGE_BYTES]);
    msg[..KEY_BYTES].copy_from_slice(key);
    msg
}

/// Decode a key from a message produced by [`key_to_message`].
pub fn message_to_key(msg: &Message) -> Key {
    let mut key = Zeroizing::new([0u8; KEY_BYTES]);
    key.copy_from_slice(&msg[..KEY_BYTES]);
    key
}

#[cfg(test)]
mod tests {
    use super::{kdf, key_to_message, message_to_key};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;
    use std::error::Error as StdError;

    #[test]
    fn halves_of_hmac() -> Result<(), Box<dyn StdError>> {
        let parent = [0x11u8; 16];
        let (left, right) = kdf(&parent, 42)?;

        let mut mac = Hmac::<Sha256>::new_from_slice(&parent).map_err(|e| e.to_string())?;
        mac.update(b"42");
        let full = mac.finalize().into_bytes();
        assert_eq!(&left[..], &full[..16]);
        assert_eq!(&right[..], &full[16..]);

        assert_ne!(kdf(&parent, 0)?.0, kdf(&parent, 1)?.0);
        Ok(())
    }

    #[test]
    fn message_wrapping() {
        let key = [7u8; 16];
        let msg = key_to_message(&key);
        assert_eq!(&msg[..16], &key);
        assert!(msg[16..].iter().all(|b| *b == 0));
        assert_eq!(*message_to_key(&msg), key);
    }
}
