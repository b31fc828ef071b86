//! Ciphertext-dependent proxy re-encryption.
//!
//! The delegator i derives, from its secret key, the public key of the
//! delegatee j and one of its own ciphertexts c_i, a re-encryption key
//! rk = (u_δ, v_δ) with
//!
//! - u_δ = A_j^T·r + e,
//! - v_δ = t_j^T·r - s_i^T·u_i,
//!
//! so that (u_δ, v_i + v_δ) is an encryption of the message of c_i under the
//! key of j. The proxy computes this sum from rk and c_i alone.

mod rekey;

pub use rekey::ReKey;

use crate::ciphertext::Ciphertext;
use crate::{Error, PreParameters, PublicKey, Result, SecretKey, COINS_BYTES};
use pre_traits::{ReEncrypter, ReKeyGenerator};
use std::sync::Arc;

fn check_length(name: &'static str, expected: usize, bytes: &[u8]) -> Result<()> {
    if bytes.len() != expected {
        Err(Error::invalid_input_length(name, expected, bytes.len()))
    } else {
        Ok(())
    }
}

/// Generate the re-encryption key turning the ciphertext `c_i` for the key
/// pair (`sk_i`, pk_i) into a ciphertext for `pk_j`, on wire encodings.
///
/// Every input length is checked before any computation.
pub fn rkg(
    par: &Arc<PreParameters>,
    sk_i: &[u8],
    pk_j: &[u8],
    c_i: &[u8],
    coins: &[u8; COINS_BYTES],
) -> Result<Vec<u8>> {
    check_length("secret key", par.secret_key_bytes(), sk_i)?;
    check_length("public key", par.public_key_bytes(), pk_j)?;
    check_length("ciphertext", par.ciphertext_bytes(), c_i)?;

    let sk_i = SecretKey::from_raw_bytes(sk_i, par)?;
    let pk_j = PublicKey::from_raw_bytes(pk_j, par)?;
    let c_i = Ciphertext::from_raw_bytes(c_i, par)?;
    let rk = sk_i.try_generate_rekey(&pk_j, &c_i, coins)?;
    Ok(rk.to_raw_bytes())
}

/// Re-encrypt the ciphertext `c_i` with the re-encryption key `rk`, on wire
/// encodings. No secret key is involved.
pub fn renc(par: &Arc<PreParameters>, rk: &[u8], c_i: &[u8]) -> Result<Vec<u8>> {
    check_length("re-encryption key", par.rekey_bytes(), rk)?;
    check_length("ciphertext", par.ciphertext_bytes(), c_i)?;

    let rk = ReKey::from_raw_bytes(rk, par)?;
    let c_i = Ciphertext::from_raw_bytes(c_i, par)?;
    Ok(rk.try_reencrypt(&c_i)?.to_raw_bytes())
}

/// Produce the re-encrypted ciphertext directly, without exposing the
/// re-encryption key.
///
/// The output equals `renc(rkg(sk_i, pk_j, c_i, coins), c_i)`; this is the
/// same protocol in a shape for callers that act as their own proxy.
pub fn reencrypt_direct(
    sk_i: &SecretKey,
    pk_j: &PublicKey,
    c_i: &Ciphertext,
    coins: &[u8; COINS_BYTES],
) -> Result<Ciphertext> {
    let rk = sk_i.try_generate_rekey(pk_j, c_i, coins)?;
    rk.try_reencrypt(c_i)
}
