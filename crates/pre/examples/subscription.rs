// Epoch-key distribution through proxy re-encryption.
//
// A publisher encrypts the content of every epoch under an epoch key derived
// from a root key. To grant a subscriber access to a range of epochs, the
// publisher wraps the derivation keys covering the range in ciphertexts under
// its own public key, and hands a proxy one re-encryption key per ciphertext.
// The proxy re-encrypts the wrapped keys for the subscriber, who unwraps them
// and re-derives the epoch keys of the range, and none of the others.

mod util;

use std::{env, error::Error, process::exit, sync::Arc};

use console::style;
use pre::{
    kdf::{key_to_message, message_to_key, KdfChain, KdfTree, Key},
    Ciphertext, KeyPair, PreParameters, PreParametersBuilder, SecurityLevel,
};
use pre_traits::{PkeDecrypter, PkeEncrypter, ReEncrypter, ReKeyGenerator};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};
use util::{
    parse_arg,
    timeit::{timeit, timeit_n},
};

fn print_notice_and_exit(error: Option<String>) -> ! {
    println!(
        "{} Epoch-key distribution with proxy re-encryption",
        style("  overview:").magenta().bold()
    );
    println!(
        "{} subscription [-h] [--help] [--epochs=<value>] [--from=<value>] [--to=<value>]",
        style("     usage:").magenta().bold()
    );
    println!(
        "{} {} must be at least 2 and {} <= {} < {}",
        style("constraints:").magenta().bold(),
        style("epochs").blue(),
        style("from").blue(),
        style("to").blue(),
        style("epochs").blue(),
    );
    if let Some(error) = error {
        println!("{} {}", style("     error:").red().bold(), error);
    }
    exit(0);
}

/// Wrap `key` for the publisher, and re-encrypt it for the subscriber as a
/// proxy would.
fn deliver(
    par: &Arc<PreParameters>,
    publisher: &KeyPair,
    subscriber: &KeyPair,
    key: &[u8; 16],
) -> Result<Key, Box<dyn Error>> {
    let mut coins = [0u8; 32];
    OsRng.fill_bytes(&mut coins);

    let wrapped = publisher
        .public_key()
        .try_encrypt(&*key_to_message(key), &mut OsRng)?;
    let rk = publisher
        .secret_key()
        .try_generate_rekey(subscriber.public_key(), &wrapped, &coins)?;

    // Only wire encodings travel to and from the proxy.
    let wrapped = Ciphertext::from_raw_bytes(&wrapped.to_raw_bytes(), par)?;
    let reencrypted = rk.try_reencrypt(&wrapped)?;
    let msg = subscriber.secret_key().try_decrypt(&reencrypted)?;
    Ok(message_to_key(&msg))
}

fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("subscription=info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.contains(&"-h".to_string()) || args.contains(&"--help".to_string()) {
        print_notice_and_exit(None)
    }

    let mut epochs = 16u64;
    let mut from = 3u64;
    let mut to = 10u64;

    for arg in &args {
        let parsed = parse_arg::<u64>(arg, "--epochs")
            .map(|r| r.map(|v| epochs = v))
            .or_else(|| parse_arg::<u64>(arg, "--from").map(|r| r.map(|v| from = v)))
            .or_else(|| parse_arg::<u64>(arg, "--to").map(|r| r.map(|v| to = v)));
        match parsed {
            Some(Ok(())) => {}
            Some(Err(e)) => print_notice_and_exit(Some(e)),
            None => print_notice_and_exit(Some(format!("Unrecognized argument: {arg}"))),
        }
    }

    if epochs < 2 || from > to || to >= epochs {
        print_notice_and_exit(Some("Invalid range of epochs".to_string()))
    }

    println!("# Epoch-key distribution");
    println!("\tepochs = {epochs}");
    println!("\tsubscription = [{from}, {to}]");

    let par = timeit!(
        "Parameters generation",
        PreParametersBuilder::new()
            .set_security_level(SecurityLevel::Pre768)
            .build_arc()?
    );

    let publisher = timeit!("Publisher key generation", KeyPair::random(&par, &mut OsRng)?);
    let subscriber = timeit!(
        "Subscriber key generation",
        KeyPair::random(&par, &mut OsRng)?
    );

    let mut root = [0u8; 16];
    OsRng.fill_bytes(&mut root);

    // Chain: a single derivation key opens the subscription and every later
    // epoch.
    println!("\n## Key chain");
    let mut chain = KdfChain::new(&root);
    chain.fast_forward(from)?;
    let dk = timeit!(
        "Derivation key delivery",
        deliver(&par, &publisher, &subscriber, chain.derivation_key())?
    );

    let mut publisher_chain = KdfChain::new(&root);
    let mut subscriber_chain = KdfChain::starting_at(from, &dk);
    publisher_chain.fast_forward(from)?;
    for _ in from..=to {
        let (epoch, expected) = publisher_chain.advance()?;
        let (_, derived) = subscriber_chain.advance()?;
        if derived != expected {
            return Err(format!("Epoch {epoch}: chain key mismatch").into());
        }
        debug!(epoch, "chain key recovered");
    }
    println!(
        "\t{} epochs {from}..={to} recovered from one key",
        style("ok").green().bold()
    );

    // Tree: the cover of the range gives access to exactly these epochs.
    println!("\n## Key tree");
    let tree = timeit!("Tree generation", KdfTree::generate(&root, epochs)?);
    let range = (from..=to).collect::<Vec<_>>();
    let cover = tree.cover(&range)?;
    println!(
        "\tcover = {:?}",
        cover.keys().map(String::as_str).collect::<Vec<_>>()
    );

    let delivered = timeit_n!("Node key delivery (per node)", cover.len() as u32, {
        let mut delivered = Vec::with_capacity(cover.len());
        for (label, key) in &cover {
            delivered.push((label.clone(), deliver(&par, &publisher, &subscriber, key)?));
        }
        delivered
    });

    let mut recovered = 0;
    for (label, key) in &delivered {
        for (leaf, epoch_key) in KdfTree::expand(label, key, tree.depth())? {
            let epoch = KdfTree::epoch_of(&leaf)
                .ok_or_else(|| format!("Invalid leaf label {leaf:?}"))?;
            if !range.contains(&epoch) {
                return Err(format!("Epoch {epoch} is outside of the subscription").into());
            }
            if tree.epoch_key(epoch) != Some(&*epoch_key) {
                return Err(format!("Epoch {epoch}: tree key mismatch").into());
            }
            recovered += 1;
        }
    }
    if recovered != range.len() {
        return Err(format!("Recovered {recovered} epoch keys out of {}", range.len()).into());
    }
    println!(
        "\t{} epochs {from}..={to} recovered from {} keys",
        style("ok").green().bold(),
        cover.len()
    );
    Ok(())
}
