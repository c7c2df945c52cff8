//! # Key Material
//!
//! The seed and the Ed25519 keypair expanded from it.
//!
//! Expansion is delegated to `ed25519-dalek` (RFC 8032): the 32-byte seed is
//! hashed with SHA-512, the low half clamped into the secret scalar, and the
//! public key computed from that. It is the same construction NaCl calls
//! `crypto_sign_seed_keypair`, so keys derived here match keys derived by
//! Cesium, Silkaj, duniterpy and friends. We do not reimplement any of it.
//!
//! ## Secret key layout
//!
//! "Secret key" means the 64-byte NaCl layout throughout this crate:
//! `seed ‖ public_key`. That is what PubSec files carry in their `sec:` line.
//!
//! ## Security considerations
//!
//! - [`Seed`] and [`SecretKey`] are zeroized on drop.
//! - `Debug` output never includes secret bytes.
//! - Key bytes are never logged.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec::BASE58;
use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH};
use crate::error::{DunikeyError, Result};

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A 32-byte stretched seed. Immutable once produced, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    /// Wrap raw seed bytes.
    pub fn from_bytes(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a seed from a slice. This is the re-entry path for seeds that
    /// were decoded from text, so the length is checked rather than assumed.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; SEED_LENGTH] =
            slice.try_into().map_err(|_| DunikeyError::InvalidInput {
                what: "seed",
                expected: SEED_LENGTH,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }

    /// Base-58 rendering.
    pub fn to_base58(&self) -> String {
        BASE58.encode(&self.0)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// An Ed25519 public key. Safe to share, log, print on a business card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Wrap raw public key bytes. No curve-point validation: any 32 bytes
    /// that came out of [`derive_keypair`] are valid by construction.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a public key from a slice, checking the length.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| DunikeyError::InvalidInput {
                what: "public key",
                expected: PUBLIC_KEY_LENGTH,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Parse a base-58 public key.
    pub fn from_base58(s: &str) -> Result<Self> {
        Self::from_slice(&BASE58.decode(s)?)
    }

    /// Parse a base-58 public key, tolerating legacy encodings whose leading
    /// zero bytes were dropped or over-counted (43-character Duniter keys).
    /// The significant bytes are left-padded with zeros back to 32.
    pub fn from_base58_padded(s: &str) -> Result<Self> {
        let decoded = BASE58.decode(s)?;
        let significant = &decoded[decoded.iter().take_while(|&&b| b == 0).count()..];
        if significant.len() > PUBLIC_KEY_LENGTH {
            return Err(DunikeyError::InvalidInput {
                what: "public key",
                expected: PUBLIC_KEY_LENGTH,
                actual: decoded.len(),
            });
        }
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes[PUBLIC_KEY_LENGTH - significant.len()..].copy_from_slice(significant);
        Ok(Self(bytes))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Base-58 rendering. This is the form users know their account by.
    pub fn to_base58(&self) -> String {
        BASE58.encode(&self.0)
    }

    /// Verify an Ed25519 signature. `false` for malformed keys or signatures
    /// as well as for signatures that simply don't match.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
            return false;
        };
        verifying_key
            .verify(message, &Signature::from_bytes(&sig_bytes))
            .is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

// ---------------------------------------------------------------------------
// SecretKey
// ---------------------------------------------------------------------------

/// A 64-byte NaCl-layout secret key (`seed ‖ public_key`). Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LENGTH]);

impl SecretKey {
    /// Raw bytes. The first half is the seed, so this is exactly as
    /// sensitive as the seed itself.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Base-58 rendering, as found in the `sec:` line of a PubSec file.
    pub fn to_base58(&self) -> String {
        BASE58.encode(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An Ed25519 keypair in NaCl layout.
///
/// The caller owns it. The secret half is wiped when the keypair drops;
/// cloning it makes a second copy that needs the same care.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    public_key: PublicKey,
    secret_key: SecretKey,
}

/// Expand a seed into its Ed25519 keypair.
///
/// Pure and infallible: every 32-byte seed is a valid Ed25519 seed, so there
/// is no rejection sampling and no retry.
pub fn derive_keypair(seed: &Seed) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed.as_bytes());
    KeyPair {
        public_key: PublicKey(signing_key.verifying_key().to_bytes()),
        secret_key: SecretKey(signing_key.to_keypair_bytes()),
    }
}

impl KeyPair {
    /// Rebuild a keypair from a 64-byte NaCl secret key.
    ///
    /// The trailing 32 bytes must be the public key of the leading 32; a
    /// secret key whose halves disagree was corrupted or stitched together.
    pub fn from_secret_key(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SECRET_KEY_LENGTH] =
            bytes.try_into().map_err(|_| DunikeyError::InvalidInput {
                what: "secret key",
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            })?;
        let signing_key = SigningKey::from_keypair_bytes(&bytes).map_err(|_| {
            DunikeyError::InvalidInput {
                what: "secret key (public half does not match seed)",
                expected: SECRET_KEY_LENGTH,
                actual: SECRET_KEY_LENGTH,
            }
        })?;
        Ok(Self {
            public_key: PublicKey(signing_key.verifying_key().to_bytes()),
            secret_key: SecretKey(bytes),
        })
    }

    /// The public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The 64-byte secret half.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// The seed this keypair was expanded from (first half of the secret key).
    pub fn seed(&self) -> Seed {
        let mut bytes = [0u8; SEED_LENGTH];
        bytes.copy_from_slice(&self.secret_key.0[..SEED_LENGTH]);
        let seed = Seed(bytes);
        bytes.zeroize();
        seed
    }

    /// Sign a message. Ed25519 is deterministic: same key and message, same
    /// signature.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key().sign(message).to_bytes()
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.public_key.verify(message, signature)
    }

    fn signing_key(&self) -> SigningKey {
        let mut seed = [0u8; SEED_LENGTH];
        seed.copy_from_slice(&self.secret_key.0[..SEED_LENGTH]);
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        signing_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even a prefix.
        write!(f, "KeyPair(pub={})", self.public_key.to_base58())
    }
}
