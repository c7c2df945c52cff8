//! # Identity
//!
//! From credentials to something a user can copy, paste and save:
//!
//! 1. **derive** — `(id_sec, pass)` → seed → keypair, plus base-58 renders
//!    and the seed re-entry path that skips stretching.
//! 2. **pubsec** — the `pub:`/`sec:` export file, short form and PubSec v1.
//! 3. **checksum** — `pubkey:chk` tags that catch copy mistakes.

pub mod checksum;
pub mod derive;
pub mod pubsec;

pub use checksum::{checksum, checksummed, parse_checksummed, verify_checksummed, CheckedKey};
pub use derive::{
    derive_all, derive_all_blocking, derive_all_with, derive_clean_keys,
    keypair_from_encoded_seed, to_encoded_strings, CleanKeys, EncodedKeys, RawKeys,
};
pub use pubsec::PubSecFile;
