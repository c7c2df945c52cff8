// Copyright (c) 2026 Dunikey Contributors. MIT License.
// See LICENSE for details.

//! # dunikey CLI
//!
//! Entry point for the `dunikey` binary. Parses CLI arguments, initializes
//! logging, and hands off to the library:
//!
//! - `derive`    — credentials → seed, public key, secret key
//! - `from-seed` — pasted seed → keypair, skipping the stretch
//! - `encode`    — hex bytes → base-58 / base-16
//! - `decode`    — base-58 / base-16 → hex bytes
//! - `export`    — write a `pub:`/`sec:` key file
//! - `checksum`  — print or verify `pubkey:chk`
//! - `version`   — build and parameter information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use dunikey::config::StretchParams;
use dunikey::identity::{checksummed, to_encoded_strings, verify_checksummed, PubSecFile};
use dunikey::{derive_all_with, keypair_from_encoded_seed, BaseX, KeyPair, BASE16, BASE58};

use cli::{Base, Commands, CredentialArgs, DunikeyCli, OutputFormat};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = DunikeyCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::Derive(args) => {
            let raw = derive(&args.credentials).await?;
            let keys = to_encoded_strings(&raw);
            let rendered = match args.format {
                OutputFormat::Text => format!(
                    "seed: {}\npub: {}\nsec: {}",
                    keys.seed, keys.public_key, keys.secret_key
                ),
                OutputFormat::Json => serde_json::to_string_pretty(&keys)?,
            };
            println!("{rendered}");
            Ok(())
        }
        Commands::FromSeed(args) => {
            let keypair = keypair_from_encoded_seed(&args.seed).context("invalid seed")?;
            println!("{}", render_keypair(&keypair, args.format)?);
            Ok(())
        }
        Commands::Encode(args) => {
            let bytes = hex::decode(args.input.trim()).context("input must be hex bytes")?;
            println!("{}", codec(args.base).encode(&bytes));
            Ok(())
        }
        Commands::Decode(args) => {
            let bytes = codec(args.base)
                .decode(args.input.trim())
                .context("input is not valid for the selected base")?;
            println!("{}", hex::encode(bytes));
            Ok(())
        }
        Commands::Export(args) => {
            let raw = derive(&args.credentials).await?;
            let file = PubSecFile::new(raw.keypair());
            let path = write_export(&file, &args.out_dir, &args.name, args.pubsec, args.force)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Checksum(args) => {
            if args.key.contains(':') {
                let checked = verify_checksummed(&args.key)?;
                if checked.deprecated {
                    println!(
                        "ok (deprecated checksum format): {}",
                        checksummed(&checked.public_key)
                    );
                } else {
                    println!("ok: {}", checksummed(&checked.public_key));
                }
            } else {
                let key = dunikey::PublicKey::from_base58_padded(args.key.trim())
                    .context("invalid public key")?;
                println!("{}", checksummed(&key));
            }
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Resolves the parameter set and runs the full derivation.
async fn derive(credentials: &CredentialArgs) -> Result<dunikey::RawKeys> {
    let params = stretch_params(credentials.params_version)?;
    tracing::info!(
        version = params.version,
        log_n = params.log_n,
        r = params.r,
        p = params.p,
        "deriving keys"
    );
    derive_all_with(&credentials.id_sec, &credentials.password, &params)
        .await
        .context("key derivation failed")
}

fn stretch_params(version: u32) -> Result<StretchParams> {
    match StretchParams::for_version(version) {
        Some(params) => Ok(params),
        None => bail!("unknown stretch parameter version {version}"),
    }
}

fn codec(base: Base) -> &'static BaseX {
    match base {
        Base::Base58 => &BASE58,
        Base::Base16 => &BASE16,
    }
}

fn render_keypair(keypair: &KeyPair, format: OutputFormat) -> Result<String> {
    let public_key = keypair.public_key().to_base58();
    let secret_key = keypair.secret_key().to_base58();
    Ok(match format {
        OutputFormat::Text => format!("pub: {public_key}\nsec: {secret_key}"),
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "publicKey": public_key,
            "secretKey": secret_key,
        }))?,
    })
}

/// Writes the key file and restricts it to the owner on Unix.
fn write_export(
    file: &PubSecFile,
    out_dir: &Path,
    name: &str,
    pubsec: bool,
    force: bool,
) -> Result<PathBuf> {
    let path = out_dir.join(PubSecFile::file_name(name));
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let contents = if pubsec {
        file.to_pubsec_string()
    } else {
        file.to_export_string()
    };
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write key file to {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }

    tracing::info!(
        public_key = %file.keypair().public_key(),
        path = %path.display(),
        "key file written"
    );
    Ok(path)
}

/// Prints version information to stdout.
fn print_version() {
    let v1 = StretchParams::V1;
    println!("dunikey {}", env!("CARGO_PKG_VERSION"));
    println!(
        "stretch v{}: scrypt log_n={} r={} p={}",
        v1.version, v1.log_n, v1.r, v1.p
    );
}
