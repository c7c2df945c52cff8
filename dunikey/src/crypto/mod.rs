//! # Cryptographic Primitives
//!
//! Two steps, both thin wrappers around audited crates:
//!
//! - **stretch** — scrypt over NFKC-normalized credentials → 32-byte seed.
//! - **keys** — Ed25519 seed expansion → keypair (via `ed25519-dalek`).
//!
//! Nothing here is hand-rolled. If you feel the urge to "optimize" scrypt or
//! reimplement seed expansion, the answer is no.

pub mod keys;
pub mod stretch;

pub use keys::{derive_keypair, KeyPair, PublicKey, SecretKey, Seed};
pub use stretch::{normalize, stretch, stretch_blocking};
