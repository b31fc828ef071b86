//! Property-based tests of the end-to-end behavior.

use pre::{cdpre, Ciphertext, Error, KeyPair, PreParameters, PreParametersBuilder, SecurityLevel};
use pre_traits::{
    DeserializeParametrized, PkeDecrypter, PkeEncrypter, ReEncrypter, ReKeyGenerator, Serialize,
};
use proptest::prelude::*;
use std::sync::Arc;

fn parameters(level: SecurityLevel) -> Arc<PreParameters> {
    PreParametersBuilder::new()
        .set_security_level(level)
        .build_arc()
        .unwrap()
}

fn security_level() -> impl Strategy<Value = SecurityLevel> {
    prop_oneof![
        Just(SecurityLevel::Pre512),
        Just(SecurityLevel::Pre768),
        Just(SecurityLevel::Pre1024),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn reencryption_preserves_plaintext(
        level in security_level(),
        coins in any::<[[u8; 32]; 4]>(),
        msg in any::<[u8; 32]>(),
    ) {
        let par = parameters(level);
        let alice = KeyPair::derive(&par, &coins[0]).unwrap();
        let bob = KeyPair::derive(&par, &coins[1]).unwrap();

        let ct = alice.public_key().try_encrypt_with_coins(&msg, &coins[2]).unwrap();
        prop_assert_eq!(alice.secret_key().try_decrypt(&ct).unwrap(), msg);

        let rk = alice
            .secret_key()
            .try_generate_rekey(bob.public_key(), &ct, &coins[3])
            .unwrap();
        let ct_bob = rk.try_reencrypt(&ct).unwrap();
        prop_assert_eq!(bob.secret_key().try_decrypt(&ct_bob).unwrap(), msg);

        // The proxy only sees wire encodings.
        let ct_bob_bytes = cdpre::renc(&par, &rk.to_raw_bytes(), &ct.to_raw_bytes()).unwrap();
        prop_assert_eq!(ct_bob_bytes, ct_bob.to_raw_bytes());
    }

    #[test]
    fn direct_reencryption_matches_two_phases(
        level in security_level(),
        coins in any::<[[u8; 32]; 4]>(),
        msg in any::<[u8; 32]>(),
    ) {
        let par = parameters(level);
        let alice = KeyPair::derive(&par, &coins[0]).unwrap();
        let bob = KeyPair::derive(&par, &coins[1]).unwrap();
        let ct = alice.public_key().try_encrypt_with_coins(&msg, &coins[2]).unwrap();

        let direct =
            cdpre::reencrypt_direct(alice.secret_key(), bob.public_key(), &ct, &coins[3]).unwrap();
        let rk = cdpre::rkg(
            &par,
            &alice.secret_key().to_raw_bytes(),
            &bob.public_key().to_raw_bytes(),
            &ct.to_raw_bytes(),
            &coins[3],
        )
        .unwrap();
        prop_assert_eq!(
            direct.to_raw_bytes(),
            cdpre::renc(&par, &rk, &ct.to_raw_bytes()).unwrap()
        );
    }

    #[test]
    fn envelopes(level in security_level(), coins in any::<[u8; 32]>()) {
        let par = parameters(level);
        let kp = KeyPair::derive(&par, &coins).unwrap();
        let ct = kp.public_key().try_encrypt_with_coins(&[0u8; 32], &coins).unwrap();
        prop_assert_eq!(Ciphertext::from_bytes(&ct.to_bytes(), &par).unwrap(), ct);
    }

    #[test]
    fn wrong_lengths_are_rejected(len in 0usize..2000) {
        let par = parameters(SecurityLevel::Pre512);
        prop_assume!(len != par.ciphertext_bytes());
        let bytes = vec![0u8; len];
        let is_length_error = matches!(
            Ciphertext::from_raw_bytes(&bytes, &par),
            Err(Error::InvalidInputLength { .. })
        );
        prop_assert!(is_length_error);
        let is_length_error = matches!(
            cdpre::renc(&par, &bytes, &vec![0u8; par.ciphertext_bytes()]),
            Err(Error::InvalidInputLength { .. })
        );
        prop_assert!(is_length_error);
    }
}

/// 1000 end-to-end trials per security level, with no decryption failure
/// tolerated. Run with `cargo test --release -- --ignored`.
#[test]
#[ignore]
fn thousand_trials_without_failure() -> Result<(), Box<dyn std::error::Error>> {
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    for level in SecurityLevel::ALL {
        let par = parameters(level);
        let mut rng = ChaCha20Rng::seed_from_u64(par.rank() as u64);
        let mut failures = 0;
        for _ in 0..1000 {
            let alice = KeyPair::random(&par, &mut rng)?;
            let bob = KeyPair::random(&par, &mut rng)?;
            let mut msg = [0u8; 32];
            rng.fill_bytes(&mut msg);
            let mut coins = [0u8; 32];
            rng.fill_bytes(&mut coins);

            let ct = alice.public_key().try_encrypt(&msg, &mut rng)?;
            let rk = cdpre::rkg(
                &par,
                &alice.secret_key().to_raw_bytes(),
                &bob.public_key().to_raw_bytes(),
                &ct.to_raw_bytes(),
                &coins,
            )?;
            let ct_bob = cdpre::renc(&par, &rk, &ct.to_raw_bytes())?;
            let ct_bob = Ciphertext::from_raw_bytes(&ct_bob, &par)?;
            if bob.secret_key().try_decrypt(&ct_bob)? != msg {
                failures += 1;
            }
        }
        assert_eq!(failures, 0, "{level:?}: {failures} failures out of 1000");
    }
    Ok(())
}
