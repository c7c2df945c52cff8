//! Public key checksums (`pubkey:chk`).
//!
//! A three-character tag appended to a base-58 public key so that a typo in
//! a copied key is caught before money goes to the wrong place. The tag is
//! the base-58 encoding of `sha256(sha256(pubkey))`, truncated.

use sha2::{Digest, Sha256};

use crate::codec::BASE58;
use crate::config::{CHECKSUM_LENGTH, PUBLIC_KEY_LENGTH};
use crate::crypto::keys::PublicKey;
use crate::error::{DunikeyError, Result};

/// Longest checksum suffix accepted when parsing.
const MAX_CHECKSUM_LENGTH: usize = 32;

fn full_checksum(public_key: &PublicKey) -> String {
    padded_checksum(public_key, PUBLIC_KEY_LENGTH)
}

/// The standard three-character checksum of a public key.
pub fn checksum(public_key: &PublicKey) -> String {
    full_checksum(public_key)
        .chars()
        .take(CHECKSUM_LENGTH)
        .collect()
}

/// `"<base58 pubkey>:<checksum>"`.
pub fn checksummed(public_key: &PublicKey) -> String {
    format!("{}:{}", public_key.to_base58(), checksum(public_key))
}

/// Outcome of checking a `pubkey:chk` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedKey {
    pub public_key: PublicKey,
    /// The checksum only matched the key padded to fewer than 32 bytes,
    /// a format older wallets produced for keys with a leading zero byte.
    pub deprecated: bool,
}

/// Checksum of the key's significant bytes, left-padded to `width` bytes.
/// Keys longer than `width` are hashed unpadded.
fn padded_checksum(public_key: &PublicKey, width: usize) -> String {
    let bytes = public_key.as_bytes();
    let significant = &bytes[bytes.iter().take_while(|&&b| b == 0).count()..];
    let mut padded = vec![0u8; width.saturating_sub(significant.len())];
    padded.extend_from_slice(significant);
    let digest = Sha256::digest(Sha256::digest(&padded));
    BASE58.encode(&digest)
}

/// Check a public key that may carry a `:checksum` suffix.
///
/// Without a suffix the key is accepted as-is. With one, the suffix must be
/// 3 to 32 characters and match the same-length prefix of the checksum of
/// the key padded to 32 bytes. Failing that, narrower paddings down to one
/// byte are tried and a match is flagged `deprecated`. No match gives
/// [`DunikeyError::ChecksumMismatch`].
pub fn verify_checksummed(text: &str) -> Result<CheckedKey> {
    let text = text.trim();
    let Some((key, given)) = text.split_once(':') else {
        return Ok(CheckedKey {
            public_key: PublicKey::from_base58_padded(text)?,
            deprecated: false,
        });
    };

    let public_key = PublicKey::from_base58_padded(key)?;
    let given_len = given.chars().count();
    let expected: String = full_checksum(&public_key)
        .chars()
        .take(given_len.clamp(CHECKSUM_LENGTH, MAX_CHECKSUM_LENGTH))
        .collect();
    let mismatch = || DunikeyError::ChecksumMismatch {
        expected: expected.clone(),
        actual: given.to_string(),
    };

    if !(CHECKSUM_LENGTH..=MAX_CHECKSUM_LENGTH).contains(&given_len) {
        return Err(mismatch());
    }
    if expected == given {
        return Ok(CheckedKey {
            public_key,
            deprecated: false,
        });
    }

    // Paddings narrower than the significant bytes all hash the same input.
    let leading_zeros = public_key.as_bytes().iter().take_while(|&&b| b == 0).count();
    let significant = PUBLIC_KEY_LENGTH - leading_zeros;
    let legacy = (significant.max(1)..PUBLIC_KEY_LENGTH).rev().any(|width| {
        padded_checksum(&public_key, width)
            .chars()
            .take(given_len)
            .eq(given.chars())
    });
    if legacy {
        tracing::warn!(
            public_key = %public_key,
            "checksum matches a deprecated short-padding format"
        );
        return Ok(CheckedKey {
            public_key,
            deprecated: true,
        });
    }
    Err(mismatch())
}

/// Parse a public key that may carry a `:checksum` suffix.
///
/// Same acceptance rules as [`verify_checksummed`], dropping the
/// deprecation flag.
pub fn parse_checksummed(text: &str) -> Result<PublicKey> {
    verify_checksummed(text).map(|checked| checked.public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{derive_keypair, Seed};

    fn sample() -> PublicKey {
        *derive_keypair(&Seed::from_bytes([21u8; 32])).public_key()
    }

    #[test]
    fn test_checksum_shape() {
        let chk = checksum(&sample());
        assert_eq!(chk.len(), 3);
        assert!(BASE58.is_valid(&chk));
        assert_eq!(chk, checksum(&sample()));
    }

    #[test]
    fn test_checksummed_roundtrip() {
        let pk = sample();
        let text = checksummed(&pk);
        assert_eq!(parse_checksummed(&text).unwrap(), pk);
    }

    #[test]
    fn test_longer_checksum_accepted() {
        let pk = sample();
        let long: String = full_checksum(&pk).chars().take(8).collect();
        let text = format!("{}:{}", pk.to_base58(), long);
        assert_eq!(parse_checksummed(&text).unwrap(), pk);
    }

    #[test]
    fn test_bare_key_accepted() {
        let pk = sample();
        assert_eq!(parse_checksummed(&pk.to_base58()).unwrap(), pk);
    }

    #[test]
    fn test_wrong_checksum_rejected() {
        let pk = sample();
        let good = checksum(&pk);
        // Flip the first character to some other alphabet member.
        let wrong_first = if good.starts_with('2') { '3' } else { '2' };
        let bad: String = std::iter::once(wrong_first).chain(good.chars().skip(1)).collect();
        let err = parse_checksummed(&format!("{}:{}", pk.to_base58(), bad)).unwrap_err();
        assert!(matches!(err, DunikeyError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_too_short_checksum_rejected() {
        let pk = sample();
        let two: String = checksum(&pk).chars().take(2).collect();
        assert!(parse_checksummed(&format!("{}:{}", pk.to_base58(), two)).is_err());
    }

    #[test]
    fn test_checksum_detects_typo_in_key() {
        let pk = sample();
        let other = *derive_keypair(&Seed::from_bytes([22u8; 32])).public_key();
        let forged = format!("{}:{}", other.to_base58(), checksum(&pk));
        // Three base-58 characters collide once in 195112 keys.
        if checksum(&other) != checksum(&pk) {
            assert!(parse_checksummed(&forged).is_err());
        }
    }
    fn leading_zero_key() -> PublicKey {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate().skip(1) {
            *b = i as u8 * 7 + 1;
        }
        PublicKey::from_bytes(bytes)
    }

    #[test]
    fn test_full_checksum_hashes_all_32_bytes() {
        let pk = leading_zero_key();
        let digest = Sha256::digest(Sha256::digest(pk.as_bytes()));
        assert_eq!(full_checksum(&pk), BASE58.encode(&digest));
    }

    #[test]
    fn test_short_padding_checksum_accepted_as_deprecated() {
        let pk = leading_zero_key();
        // Older wallets hashed the 31 significant bytes only.
        let digest = Sha256::digest(Sha256::digest(&pk.as_bytes()[1..]));
        let legacy: String = BASE58.encode(&digest).chars().take(3).collect();
        let text = format!("{}:{}", pk.to_base58(), legacy);

        let checked = verify_checksummed(&text).unwrap();
        assert_eq!(checked.public_key, pk);
        assert_eq!(checked.deprecated, legacy != checksum(&pk));
        assert_eq!(parse_checksummed(&text).unwrap(), pk);
    }

    #[test]
    fn test_current_checksum_not_deprecated() {
        let pk = leading_zero_key();
        let checked = verify_checksummed(&checksummed(&pk)).unwrap();
        assert_eq!(checked.public_key, pk);
        assert!(!checked.deprecated);
        assert!(!verify_checksummed(&pk.to_base58()).unwrap().deprecated);
    }
}
