//! # Constants & Stretch Parameters
//!
//! Every magic number in dunikey lives here. Most of them are fixed by the
//! key formats we interoperate with (Ed25519, Duniter PubSec files, Bitcoin's
//! base-58 alphabet) and are not ours to change.
//!
//! The stretch parameters are different: they are ours, and they are part of
//! every identity ever derived with them. Change one and every user gets a
//! brand-new, unrelated keypair with no error to tell them why. That is why
//! they are a versioned value ([`StretchParams`]) rather than three loose
//! integers, and why the standing set is frozen as [`StretchParams::V1`].

use serde::{Deserialize, Serialize};

use crate::error::{DunikeyError, Result};

// ---------------------------------------------------------------------------
// Key Material Lengths
// ---------------------------------------------------------------------------

/// Seed length in bytes. Fixed: it is the Ed25519 secret scalar seed.
pub const SEED_LENGTH: usize = 32;

/// Ed25519 public (verifying) key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// NaCl-style secret key length: seed followed by the public key.
pub const SECRET_KEY_LENGTH: usize = SEED_LENGTH + PUBLIC_KEY_LENGTH;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Codec Alphabets
// ---------------------------------------------------------------------------

/// Bitcoin base-58 alphabet. No `0`, `O`, `I` or `l`, so a human copying a
/// key off a screen cannot confuse look-alike glyphs.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Lowercase hexadecimal alphabet, used through the same base-X machinery.
pub const BASE16_ALPHABET: &str = "0123456789abcdef";

// ---------------------------------------------------------------------------
// Export Formats
// ---------------------------------------------------------------------------

/// `Type:` header value of a Duniter PubSec key file.
pub const PUBSEC_TYPE: &str = "PubSec";

/// `Version:` header value of a Duniter PubSec key file.
pub const PUBSEC_VERSION: u32 = 1;

/// Suffix appended to export file names.
pub const EXPORT_FILE_SUFFIX: &str = ".dunikey.yml";

/// Number of base-58 characters in a public key checksum.
pub const CHECKSUM_LENGTH: usize = 3;

// ---------------------------------------------------------------------------
// Stretch Parameters
// ---------------------------------------------------------------------------

/// Upper bound on the memory a single stretch may request (1 GiB).
///
/// scrypt's memory cost is `128 · r · 2^log_n` bytes. Anything past this is
/// a configuration mistake, not a security margin.
pub const MAX_STRETCH_MEMORY: u64 = 1 << 30;

/// scrypt cost parameters for seed derivation.
///
/// Output length is not a parameter: seeds are always [`SEED_LENGTH`] bytes.
/// The `version` tag exists so that a persisted identity can record which
/// parameter set produced it; the stretch itself only reads `log_n`, `r`
/// and `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StretchParams {
    /// Parameter-set version.
    pub version: u32,
    /// CPU/memory cost exponent (N = 2^log_n).
    pub log_n: u8,
    /// Block size.
    pub r: u32,
    /// Parallelization.
    pub p: u32,
}

impl StretchParams {
    /// The standing parameter set: N = 2^12, r = 16, p = 1.
    ///
    /// Same values Cesium and Duniter clients use for credentials, so keys
    /// derived here match keys derived there.
    pub const V1: StretchParams = StretchParams {
        version: 1,
        log_n: 12,
        r: 16,
        p: 1,
    };

    /// Look up a frozen parameter set by version number.
    pub fn for_version(version: u32) -> Option<StretchParams> {
        match version {
            1 => Some(Self::V1),
            _ => None,
        }
    }

    /// Build an ad-hoc parameter set. Tagged version 0, which never matches a
    /// frozen set. Meant for tests and benches that need cheap stretching.
    pub fn custom(log_n: u8, r: u32, p: u32) -> Self {
        Self {
            version: 0,
            log_n,
            r,
            p,
        }
    }

    /// Memory cost in bytes (`128 · r · 2^log_n`), or an error if that does
    /// not fit in the address space or exceeds [`MAX_STRETCH_MEMORY`].
    pub fn memory_cost(&self) -> Result<u64> {
        let n = 1u64
            .checked_shl(u32::from(self.log_n))
            .ok_or_else(|| DunikeyError::Derivation(format!("log_n {} too large", self.log_n)))?;
        let bytes = 128u64
            .checked_mul(u64::from(self.r))
            .and_then(|b| b.checked_mul(n))
            .ok_or_else(|| {
                DunikeyError::Derivation("memory cost overflows the address space".to_string())
            })?;
        if bytes > MAX_STRETCH_MEMORY || usize::try_from(bytes).is_err() {
            return Err(DunikeyError::Derivation(format!(
                "memory cost of {bytes} bytes exceeds the {MAX_STRETCH_MEMORY} byte limit"
            )));
        }
        Ok(bytes)
    }
}

impl Default for StretchParams {
    fn default() -> Self {
        Self::V1
    }
}
