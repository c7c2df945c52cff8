//! # Derivation Facade
//!
//! The one call most callers need: credentials in, keys out.
//!
//! ```text
//! (id_sec, pass) ──stretch──▶ Seed ──expand──▶ KeyPair
//!                                   └──────────────┴──▶ RawKeys ──base58──▶ EncodedKeys
//! ```
//!
//! `pass` is the password and `id_sec` the salt. If stretching fails the
//! keypair is never computed and the stretch error comes back unchanged.

use std::fmt;

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec::BASE58;
use crate::config::{StretchParams, SEED_LENGTH};
use crate::crypto::keys::{derive_keypair, KeyPair, PublicKey, SecretKey, Seed};
use crate::crypto::stretch::{stretch, stretch_blocking};
use crate::error::{DunikeyError, Result};

/// Everything a derivation produces, as raw bytes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RawKeys {
    /// The stretched seed.
    pub seed: Seed,
    /// Ed25519 public key.
    pub public_key: PublicKey,
    /// NaCl-layout secret key (`seed ‖ public_key`).
    pub secret_key: SecretKey,
}

impl RawKeys {
    fn from_parts(seed: Seed, keypair: &KeyPair) -> Self {
        Self {
            seed,
            public_key: *keypair.public_key(),
            secret_key: keypair.secret_key().clone(),
        }
    }

    /// Rebuild the keypair. Same result as [`derive_keypair`] on the seed.
    pub fn keypair(&self) -> KeyPair {
        derive_keypair(&self.seed)
    }
}

/// [`RawKeys`] rendered in base-58. The seed and secret key strings are
/// wiped when this drops.
#[derive(Clone, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct EncodedKeys {
    /// Base-58 seed.
    pub seed: String,
    /// Base-58 public key.
    pub public_key: String,
    /// Base-58 secret key.
    pub secret_key: String,
}

impl fmt::Debug for EncodedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedKeys")
            .field("seed", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Encoded keys together with the credentials that produced them, for
/// callers that display or export all of it at once.
#[derive(Clone, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CleanKeys {
    /// Base-58 keys.
    #[serde(flatten)]
    pub keys: EncodedKeys,
    /// The secret identifier, as supplied (not normalized).
    pub id_sec: String,
    /// The password, as supplied (not normalized).
    pub password: String,
}

impl fmt::Debug for CleanKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanKeys")
            .field("keys", &self.keys)
            .field("id_sec", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Derive seed and keypair from credentials with the standing parameters
/// ([`StretchParams::V1`]).
pub async fn derive_all(id_sec: &str, pass: &str) -> Result<RawKeys> {
    derive_all_with(id_sec, pass, &StretchParams::V1).await
}

/// Derive seed and keypair from credentials with explicit parameters.
pub async fn derive_all_with(id_sec: &str, pass: &str, params: &StretchParams) -> Result<RawKeys> {
    let seed = stretch(pass, id_sec, params).await?;
    let keypair = derive_keypair(&seed);
    tracing::debug!(public_key = %keypair.public_key(), version = params.version, "keypair derived");
    Ok(RawKeys::from_parts(seed, &keypair))
}

/// Blocking twin of [`derive_all_with`], for synchronous callers.
pub fn derive_all_blocking(id_sec: &str, pass: &str, params: &StretchParams) -> Result<RawKeys> {
    let seed = stretch_blocking(pass, id_sec, params)?;
    let keypair = derive_keypair(&seed);
    Ok(RawKeys::from_parts(seed, &keypair))
}

/// Render raw keys in base-58.
pub fn to_encoded_strings(raw: &RawKeys) -> EncodedKeys {
    EncodedKeys {
        seed: raw.seed.to_base58(),
        public_key: raw.public_key.to_base58(),
        secret_key: raw.secret_key.to_base58(),
    }
}

/// Derive with the standing parameters and return the base-58 keys along
/// with the credentials.
pub async fn derive_clean_keys(id_sec: &str, pass: &str) -> Result<CleanKeys> {
    let raw = derive_all(id_sec, pass).await?;
    Ok(CleanKeys {
        keys: to_encoded_strings(&raw),
        id_sec: id_sec.to_string(),
        password: pass.to_string(),
    })
}

/// Rebuild a keypair from a seed pasted as text, skipping stretching.
///
/// Exactly 64 hex digits are read as fixed-width hex (a seed dump);
/// anything else is read as base-58. Either way the result must be 32 bytes.
pub fn keypair_from_encoded_seed(text: &str) -> Result<KeyPair> {
    let text = text.trim();
    let bytes = if text.len() == 2 * SEED_LENGTH && text.bytes().all(|b| b.is_ascii_hexdigit()) {
        hex::decode(text).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                DunikeyError::InvalidCharacter {
                    character: c,
                    position: index,
                    base: 16,
                }
            }
            _ => DunikeyError::InvalidInput {
                what: "hex seed",
                expected: SEED_LENGTH,
                actual: text.len() / 2,
            },
        })?
    } else {
        BASE58.decode(text)?
    };
    let mut seed_bytes = bytes;
    let seed = Seed::from_slice(&seed_bytes);
    seed_bytes.zeroize();
    Ok(derive_keypair(&seed?))
}
