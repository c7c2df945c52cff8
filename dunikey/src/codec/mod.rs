//! # Base-X Codec
//!
//! Human-copyable text for raw key bytes. One generic implementation
//! ([`BaseX`]), two standing instances:
//!
//! - [`BASE58`] — Bitcoin's alphabet. What users see for seeds and keys.
//! - [`BASE16`] — lowercase hex, run through the same base-X arithmetic.
//!
//! Note that [`BASE16`] is *positional* hex, not fixed-width hex: a leading
//! `0x0a` byte encodes as `a`, not `0a`. That is what the key format has
//! always used, so that is what we produce. For fixed-width hex (e.g. a
//! 64-character seed dump) use the `hex` crate; see
//! [`identity::keypair_from_encoded_seed`](crate::identity::keypair_from_encoded_seed).

pub mod basex;

pub use basex::BaseX;

use crate::config::{BASE16_ALPHABET, BASE58_ALPHABET};

/// The base-58 codec.
pub static BASE58: BaseX = BaseX::from_static(BASE58_ALPHABET);

/// The base-16 codec.
pub static BASE16: BaseX = BaseX::from_static(BASE16_ALPHABET);
