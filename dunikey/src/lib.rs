// Copyright (c) 2026 Dunikey Contributors. MIT License.
// See LICENSE for details.

//! # dunikey — Credential Key Derivation
//!
//! Deterministic Ed25519 identities from two strings a human can remember.
//!
//! A secret identifier and a password are NFKC-normalized and stretched with
//! scrypt into a 32-byte seed; the seed is expanded into an Ed25519 keypair;
//! every byte sequence along the way can be rendered as base-58 (or base-16)
//! text and read back without loss.
//!
//! Same credentials, same parameters, same keys. Forever. There is no
//! randomness anywhere in the pipeline, which is exactly why a mistake here
//! is permanent: a bug that changes one bit of the seed hands every user a
//! different identity, and there is no "refresh" that brings the old one back.
//!
//! ## Architecture
//!
//! - **codec** — Generic base-X codec with `BASE58` and `BASE16` instances.
//! - **crypto** — scrypt stretching and Ed25519 seed expansion. Don't roll your own.
//! - **identity** — The derivation facade, export files, and key checksums.
//! - **config** — Lengths, alphabets, and the versioned stretch parameters.
//! - **error** — The one error type everything returns.
//!
//! ## Example
//!
//! ```no_run
//! # async fn demo() -> dunikey::Result<()> {
//! let raw = dunikey::derive_all("alice-id", "correcthorsebatterystaple").await?;
//! let keys = dunikey::to_encoded_strings(&raw);
//! println!("pub: {}", keys.public_key);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;

pub use codec::{BaseX, BASE16, BASE58};
pub use config::StretchParams;
pub use crypto::{derive_keypair, stretch, KeyPair, PublicKey, SecretKey, Seed};
pub use error::{DunikeyError, Result};
pub use identity::{
    derive_all, derive_all_with, keypair_from_encoded_seed, to_encoded_strings, EncodedKeys,
    PubSecFile, RawKeys,
};
