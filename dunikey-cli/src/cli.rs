//! # CLI Interface
//!
//! Defines the command-line argument structure for `dunikey` using `clap`
//! derive. Credentials can come from flags or from the environment; prefer
//! the environment, since flags end up in shell history.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Deterministic Ed25519 keys from a secret identifier and a password.
#[derive(Parser, Debug)]
#[command(
    name = "dunikey",
    about = "Derive Ed25519 keys from credentials, and encode/decode key material",
    version,
    propagate_version = true
)]
pub struct DunikeyCli {
    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "DUNIKEY_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format: "pretty" or "json". Logs go to stderr.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stretch credentials into a seed and print seed, public and secret keys.
    Derive(DeriveArgs),
    /// Rebuild a keypair from a seed (64 hex digits or base-58), no stretching.
    FromSeed(FromSeedArgs),
    /// Encode hex bytes with the base-X codec.
    Encode(CodecArgs),
    /// Decode a base-X string to hex bytes.
    Decode(CodecArgs),
    /// Derive keys and write them to `<name>.dunikey.yml`.
    Export(ExportArgs),
    /// Print `pubkey:checksum`, or verify one.
    Checksum(ChecksumArgs),
    /// Print version information and the standing stretch parameters.
    Version,
}

/// The credentials pair.
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Secret identifier (the salt).
    #[arg(long, env = "DUNIKEY_ID_SEC", hide_env_values = true)]
    pub id_sec: String,

    /// Password.
    #[arg(long, env = "DUNIKEY_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Stretch parameter set version. Changing it changes every key.
    #[arg(long, default_value_t = 1)]
    pub params_version: u32,
}

/// Arguments for the `derive` subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `from-seed` subcommand.
#[derive(Args, Debug)]
pub struct FromSeedArgs {
    /// The seed: 64 hex digits, or base-58.
    #[arg(env = "DUNIKEY_SEED", hide_env_values = true)]
    pub seed: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `encode` and `decode`.
#[derive(Args, Debug)]
pub struct CodecArgs {
    /// Input: hex bytes for `encode`, a base-X string for `decode`.
    pub input: String,

    /// Which alphabet to use.
    #[arg(long, value_enum, default_value_t = Base::Base58)]
    pub base: Base,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// File name stem; `.dunikey.yml` is appended.
    #[arg(long, short = 'n')]
    pub name: String,

    /// Directory to write into.
    #[arg(long, short = 'o', default_value = ".")]
    pub out_dir: PathBuf,

    /// Write the full PubSec v1 file (with `Type`/`Version` headers).
    #[arg(long)]
    pub pubsec: bool,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `checksum` subcommand.
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// A base-58 public key, optionally followed by `:checksum` to verify.
    pub key: String,
}

/// Output format for key listings.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `name: value` lines.
    Text,
    /// A JSON object.
    Json,
}

/// Codec alphabet selector.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Base {
    /// Base-58 (Bitcoin alphabet).
    #[value(name = "58")]
    Base58,
    /// Base-16 (lowercase hex, base-X arithmetic).
    #[value(name = "16")]
    Base16,
}
