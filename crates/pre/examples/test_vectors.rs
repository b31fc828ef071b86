// Print deterministic test vectors of the ciphertext-dependent proxy
// re-encryption, for every security level or for the one selected with
// `--rank=<value>`.

mod util;

use std::{env, error::Error, process::exit, sync::Arc};

use console::style;
use pre::{cdpre, KeyPair, PreParameters, PreParametersBuilder};
use pre_traits::PkeEncrypter;
use util::parse_arg;

const COINS_I: [u8; 32] = [1u8; 32];
const COINS_J: [u8; 32] = [2u8; 32];
const ENCRYPTION_COINS: [u8; 32] = [3u8; 32];
const REKEY_COINS: [u8; 32] = [4u8; 32];

fn print_notice_and_exit(error: Option<String>) -> ! {
    println!(
        "{} Deterministic test vectors of the re-encryption",
        style("  overview:").magenta().bold()
    );
    println!(
        "{} test_vectors [-h] [--help] [--rank=<value>] [--full]",
        style("     usage:").magenta().bold()
    );
    println!(
        "{} {} must be 2, 3 or 4",
        style("constraints:").magenta().bold(),
        style("rank").blue(),
    );
    if let Some(error) = error {
        println!("{} {}", style("     error:").red().bold(), error);
    }
    exit(0);
}

fn print_field(name: &str, bytes: &[u8], full: bool) {
    let encoded = if full {
        hex::encode(bytes)
    } else {
        format!("{}… ({} bytes)", hex::encode(&bytes[..16]), bytes.len())
    };
    println!("\t{} = {encoded}", style(name).blue());
}

fn print_vectors(par: &Arc<PreParameters>, full: bool) -> Result<(), Box<dyn Error>> {
    println!("\n## {:?} (k = {})", par.security_level(), par.rank());

    let (pk_i, sk_i) = KeyPair::derive(par, &COINS_I)?.into_parts();
    let (pk_j, _) = KeyPair::derive(par, &COINS_J)?.into_parts();

    let mut msg = [0u8; 32];
    msg.iter_mut().enumerate().for_each(|(i, m)| *m = i as u8);
    let ct_i = pk_i.try_encrypt_with_coins(&msg, &ENCRYPTION_COINS)?;

    let rk = cdpre::rkg(
        par,
        &sk_i.to_raw_bytes(),
        &pk_j.to_raw_bytes(),
        &ct_i.to_raw_bytes(),
        &REKEY_COINS,
    )?;
    let ct_j = cdpre::renc(par, &rk, &ct_i.to_raw_bytes())?;

    print_field("pk_i", &pk_i.to_raw_bytes(), full);
    print_field("sk_i", &sk_i.to_raw_bytes(), full);
    print_field("pk_j", &pk_j.to_raw_bytes(), full);
    print_field("ct_i", &ct_i.to_raw_bytes(), full);
    print_field("rk", &rk, full);
    print_field("ct_j", &ct_j, full);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.contains(&"-h".to_string()) || args.contains(&"--help".to_string()) {
        print_notice_and_exit(None)
    }

    let mut ranks = vec![2, 3, 4];
    let mut full = false;
    for arg in &args {
        if arg == "--full" {
            full = true;
        } else if let Some(rank) = parse_arg::<usize>(arg, "--rank") {
            match rank {
                Ok(rank) => ranks = vec![rank],
                Err(e) => print_notice_and_exit(Some(e)),
            }
        } else {
            print_notice_and_exit(Some(format!("Unrecognized argument: {arg}")))
        }
    }

    println!("# Test vectors");
    println!("\tcoins_i = {}", hex::encode(COINS_I));
    println!("\tcoins_j = {}", hex::encode(COINS_J));
    println!("\tmessage = 000102…1f");
    println!("\tencryption coins = {}", hex::encode(ENCRYPTION_COINS));
    println!("\tre-key coins = {}", hex::encode(REKEY_COINS));

    for rank in ranks {
        let par = match PreParametersBuilder::new().set_rank(rank).build_arc() {
            Ok(par) => par,
            Err(e) => print_notice_and_exit(Some(e.to_string())),
        };
        print_vectors(&par, full)?;
    }
    Ok(())
}
