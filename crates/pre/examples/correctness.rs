// Empirical correctness of the ciphertext-dependent proxy re-encryption.
//
// Each trial generates three key pairs and encrypts a random message for the
// first one. It re-encrypts the ciphertext to the second key pair through the
// typed interface and to the third one through the wire encodings, and checks
// that every holder decrypts the original message. Trials run in parallel and
// are reproducible from `--seed`.

mod util;

use std::{
    env,
    error::Error,
    process::exit,
    sync::atomic::{AtomicUsize, Ordering},
    sync::Arc,
};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use pre::{cdpre, KeyPair, PreParameters, PreParametersBuilder};
use pre_traits::{PkeDecrypter, PkeEncrypter, ReEncrypter, ReKeyGenerator};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use util::{parse_arg, timeit::timeit};

fn print_notice_and_exit(error: Option<String>) -> ! {
    println!(
        "{} Correctness of proxy re-encryption over many trials",
        style("  overview:").magenta().bold()
    );
    println!(
        "{} correctness [-h] [--help] [--trials=<value>] [--rank=<value>] [--seed=<value>]",
        style("     usage:").magenta().bold()
    );
    println!(
        "{} {} must be at least 1 and {} must be 2, 3 or 4",
        style("constraints:").magenta().bold(),
        style("trials").blue(),
        style("rank").blue(),
    );
    if let Some(error) = error {
        println!("{} {}", style("     error:").red().bold(), error);
    }
    exit(0);
}

/// Outcome of one trial: whether each decryption recovered the message.
#[derive(Debug, Default, Clone, Copy)]
struct Trial {
    direct: bool,
    typed: bool,
    wire: bool,
}

fn run_trial(par: &Arc<PreParameters>, seed: u64, index: u64) -> pre::Result<Trial> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(index);

    let alice = KeyPair::random(par, &mut rng)?;
    let bob = KeyPair::random(par, &mut rng)?;
    let carol = KeyPair::random(par, &mut rng)?;

    let mut msg = [0u8; 32];
    rng.fill_bytes(&mut msg);
    let mut coins = [0u8; 32];

    let ct = alice.public_key().try_encrypt(&msg, &mut rng)?;

    rng.fill_bytes(&mut coins);
    let rk = alice
        .secret_key()
        .try_generate_rekey(bob.public_key(), &ct, &coins)?;
    let ct_bob = rk.try_reencrypt(&ct)?;

    rng.fill_bytes(&mut coins);
    let rk = cdpre::rkg(
        par,
        &alice.secret_key().to_raw_bytes(),
        &carol.public_key().to_raw_bytes(),
        &ct.to_raw_bytes(),
        &coins,
    )?;
    let ct_carol = cdpre::renc(par, &rk, &ct.to_raw_bytes())?;
    let ct_carol = pre::Ciphertext::from_raw_bytes(&ct_carol, par)?;

    Ok(Trial {
        direct: alice.secret_key().try_decrypt(&ct)? == msg,
        typed: bob.secret_key().try_decrypt(&ct_bob)? == msg,
        wire: carol.secret_key().try_decrypt(&ct_carol)? == msg,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("correctness=info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.contains(&"-h".to_string()) || args.contains(&"--help".to_string()) {
        print_notice_and_exit(None)
    }

    let mut trials = 1000u64;
    let mut rank = 3usize;
    let mut seed = 0u64;

    for arg in &args {
        let parsed = parse_arg::<u64>(arg, "--trials")
            .map(|r| r.map(|v| trials = v))
            .or_else(|| parse_arg::<usize>(arg, "--rank").map(|r| r.map(|v| rank = v)))
            .or_else(|| parse_arg::<u64>(arg, "--seed").map(|r| r.map(|v| seed = v)));
        match parsed {
            Some(Ok(())) => {}
            Some(Err(e)) => print_notice_and_exit(Some(e)),
            None => print_notice_and_exit(Some(format!("Unrecognized argument: {arg}"))),
        }
    }

    if trials == 0 {
        print_notice_and_exit(Some("The number of trials must be nonzero".to_string()))
    }

    let par = match PreParametersBuilder::new().set_rank(rank).build_arc() {
        Ok(par) => par,
        Err(e) => print_notice_and_exit(Some(e.to_string())),
    };

    println!("# Proxy re-encryption correctness");
    println!("\tsecurity level = {:?}", par.security_level());
    println!("\ttrials = {trials}");
    println!("\tseed = {seed}");
    println!("💻 Available CPU cores: {}", rayon::current_num_threads());

    let pb = ProgressBar::new(trials);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials")?,
    );

    let direct = AtomicUsize::new(0);
    let typed = AtomicUsize::new(0);
    let wire = AtomicUsize::new(0);

    timeit!("Trials", {
        (0..trials)
            .into_par_iter()
            .try_for_each(|index| -> pre::Result<()> {
                let trial = run_trial(&par, seed, index)?;
                for (ok, counter) in [
                    (trial.direct, &direct),
                    (trial.typed, &typed),
                    (trial.wire, &wire),
                ] {
                    if !ok {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }
                }
                if !(trial.direct && trial.typed && trial.wire) {
                    warn!(index, ?trial, "decryption failure");
                }
                pb.inc(1);
                Ok(())
            })?
    });
    pb.finish();

    let failures = [
        ("direct decryption", direct.into_inner()),
        ("typed re-encryption", typed.into_inner()),
        ("wire re-encryption", wire.into_inner()),
    ];
    for (name, count) in failures {
        info!(name, count, "decryption failures");
        let status = if count == 0 {
            style("ok").green().bold()
        } else {
            style("FAILED").red().bold()
        };
        println!("\t{status} {name}: {count} failures out of {trials}");
    }

    if failures.iter().any(|(_, count)| *count != 0) {
        exit(1);
    }
    Ok(())
}
