//! Error types for credential key derivation.
//!
//! Every fallible operation in the crate returns a [`DunikeyError`]. All of
//! them are terminal: inputs and parameters are deterministic, so retrying
//! with the same inputs reproduces the same failure.
//!
//! Messages never carry secret material. A decode error reports the offending
//! character and its position, which is fine for public strings but means
//! callers should think twice before echoing errors from decoding a secret key.

use thiserror::Error;

/// Errors that can occur while stretching, deriving, encoding or parsing keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DunikeyError {
    /// The stretching primitive rejected its parameters or could not run.
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// A decoded string contained a character outside the codec alphabet.
    #[error("non-base{base} character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character index (not byte offset) within the input.
        position: usize,
        /// Size of the alphabet that was being decoded.
        base: usize,
    },

    /// A byte sequence had the wrong length for its role.
    #[error("invalid {what}: expected {expected} bytes, got {actual}")]
    InvalidInput {
        /// What was being parsed ("seed", "secret key", ...).
        what: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// A codec alphabet was rejected at construction time.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// A key export file could not be parsed or is internally inconsistent.
    #[error("malformed key file: {0}")]
    MalformedKeyFile(String),

    /// A checksummed public key did not match its checksum.
    #[error("public key checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Checksum computed from the public key.
        expected: String,
        /// Checksum that came with the input.
        actual: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DunikeyError>;
