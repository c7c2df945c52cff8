//! End-to-end tests for credential key derivation.
//!
//! These run the full pipeline with the standing parameters: credentials in,
//! scrypt, Ed25519 expansion, base-58 out, and back in again through the
//! seed re-entry path and the export file. Each test stands alone.

use dunikey::config::StretchParams;
use dunikey::identity::{derive_all_blocking, derive_clean_keys, PubSecFile};
use dunikey::{
    derive_all, derive_all_with, derive_keypair, keypair_from_encoded_seed, to_encoded_strings,
    Seed, BASE16, BASE58,
};

const ID_SEC: &str = "alice-id";
const PASS: &str = "correcthorsebatterystaple";
const SEED_HEX: &str = "0aff9904e45f788f5ed379acb53b47168651369d7d1a2be5c9eb1d3a025c9a17";

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn differing_bits(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_reference_scenario_is_deterministic() {
    let first = derive_all(ID_SEC, PASS).await.unwrap();
    let second = derive_all(ID_SEC, PASS).await.unwrap();
    assert_eq!(first, second);

    let a = to_encoded_strings(&first);
    let b = to_encoded_strings(&second);
    assert_eq!(a, b);

    assert_eq!(a.seed, "jw8UeDLy6jTJwBVZ84SGVZxA5bLQC3vPxkvWdJUeDHp");
    assert_eq!(a.public_key, "8ME2pQoTwhsFUFXZJfvLUTiFksUv9272MkSjAAEGs2Go");
    assert_eq!(
        a.secret_key,
        "DkivVLF4Fh2nKCeb7j9o4j4Y1pmygBxaWR2MpPtNGYvKvBkasUHh5qscJAtxw151JMGwAtoSzCNr8bBsSMbY3Fm"
    );
    assert_eq!(hex::encode(first.seed.as_bytes()), SEED_HEX);
}

#[tokio::test]
async fn test_reference_seed_hex_reentry() {
    // First byte is 0x0a: positional base-16 would lose a nibble here.
    let keypair = keypair_from_encoded_seed(SEED_HEX).unwrap();
    assert_eq!(
        keypair.public_key().to_base58(),
        "8ME2pQoTwhsFUFXZJfvLUTiFksUv9272MkSjAAEGs2Go"
    );
    assert_eq!(keypair, derive_all(ID_SEC, PASS).await.unwrap().keypair());
    assert_eq!(BASE16.encode(keypair.seed().as_bytes()), &SEED_HEX[1..]);
}

#[tokio::test]
async fn test_standing_params_are_v1() {
    let implicit = derive_all(ID_SEC, PASS).await.unwrap();
    let explicit = derive_all_with(ID_SEC, PASS, &StretchParams::V1).await.unwrap();
    assert_eq!(implicit, explicit);
}

#[tokio::test]
async fn test_async_and_blocking_agree() {
    let async_keys = derive_all(ID_SEC, PASS).await.unwrap();
    let blocking = derive_all_blocking(ID_SEC, PASS, &StretchParams::V1).unwrap();
    assert_eq!(async_keys, blocking);
}

#[tokio::test]
async fn test_salt_and_password_roles_are_distinct() {
    let normal = derive_all(ID_SEC, PASS).await.unwrap();
    let swapped = derive_all(PASS, ID_SEC).await.unwrap();
    assert_ne!(normal.seed, swapped.seed);
}

// ---------------------------------------------------------------------------
// Avalanche
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_single_character_change_avalanches() {
    let base = derive_all(ID_SEC, PASS).await.unwrap();
    let tweaked = derive_all(ID_SEC, "correcthorsebatterystaplf").await.unwrap();

    let a = base.seed.as_bytes();
    let b = tweaked.seed.as_bytes();

    // 256 bits, expect ~128 to flip. Anything in 64..=192 is a healthy hash;
    // outside that band is astronomically unlikely for scrypt.
    let flipped = differing_bits(a, b);
    assert!((64..=192).contains(&flipped), "only {flipped} bits differ");

    // Not a prefix- or suffix-preserving transform.
    assert_ne!(a[..4], b[..4]);
    assert_ne!(a[28..], b[28..]);
    assert_ne!(base.public_key, tweaked.public_key);
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_visually_identical_credentials_match() {
    let composed = derive_all("Jos\u{e9}", "p\u{e2}ss").await.unwrap();
    let decomposed = derive_all("Jose\u{301}", "pa\u{302}ss").await.unwrap();
    assert_eq!(composed, decomposed);
}

// ---------------------------------------------------------------------------
// Re-entry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_seed_reentry_reproduces_keypair() {
    let raw = derive_all(ID_SEC, PASS).await.unwrap();
    let encoded = to_encoded_strings(&raw);

    let decoded = BASE58.decode(&encoded.seed).unwrap();
    let seed = Seed::from_slice(&decoded).unwrap();
    let keypair = derive_keypair(&seed);

    assert_eq!(*keypair.public_key(), raw.public_key);
    assert_eq!(*keypair.secret_key(), raw.secret_key);
    assert_eq!(keypair.public_key().to_base58(), encoded.public_key);
    assert_eq!(keypair.secret_key().to_base58(), encoded.secret_key);
}

#[tokio::test]
async fn test_seed_reentry_from_pasted_text() {
    let raw = derive_all(ID_SEC, PASS).await.unwrap();
    let via_b58 = keypair_from_encoded_seed(&raw.seed.to_base58()).unwrap();
    let via_hex = keypair_from_encoded_seed(&hex::encode(raw.seed.as_bytes())).unwrap();
    assert_eq!(via_b58, raw.keypair());
    assert_eq!(via_hex, raw.keypair());
}

#[tokio::test]
async fn test_base16_codec_roundtrips_derived_keys() {
    let raw = derive_all(ID_SEC, PASS).await.unwrap();
    for bytes in [
        raw.seed.as_bytes().as_slice(),
        raw.public_key.as_bytes().as_slice(),
        raw.secret_key.as_bytes().as_slice(),
    ] {
        assert_eq!(BASE16.decode(&BASE16.encode(bytes)).unwrap(), bytes);
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_export_file_roundtrip() {
    let raw = derive_all(ID_SEC, PASS).await.unwrap();
    let file = PubSecFile::new(raw.keypair());
    let encoded = to_encoded_strings(&raw);

    let text = file.to_export_string();
    assert_eq!(
        text,
        format!("pub: {}\nsec: {}", encoded.public_key, encoded.secret_key)
    );

    let parsed = PubSecFile::parse(&text).unwrap();
    assert_eq!(*parsed.keypair().public_key(), raw.public_key);

    let signature = parsed.keypair().sign(b"hello");
    assert!(raw.public_key.verify(b"hello", &signature));
}

#[tokio::test]
async fn test_clean_keys_carry_credentials() {
    let clean = derive_clean_keys(ID_SEC, PASS).await.unwrap();
    let raw = derive_all(ID_SEC, PASS).await.unwrap();
    assert_eq!(clean.keys, to_encoded_strings(&raw));
    assert_eq!(clean.id_sec, ID_SEC);
    assert_eq!(clean.password, PASS);
}
