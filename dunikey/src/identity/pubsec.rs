//! # Key Export Files
//!
//! Plain-text keypair exports, in two flavors:
//!
//! ```text
//! pub: <base58 public key>            Type: PubSec
//! sec: <base58 secret key>            Version: 1
//!                                     pub: <base58 public key>
//!                                     sec: <base58 secret key>
//! ```
//!
//! The short form on the left is what a browser download of the derived keys
//! looks like; the long form is the Duniter PubSec v1 file that Cesium,
//! Silkaj and duniterpy read. [`PubSecFile::parse`] accepts either.
//!
//! These files hold the secret key in the clear. Producing the text is our
//! job; where it ends up (and with what permissions) is the caller's.

use crate::codec::BASE58;
use crate::config::{EXPORT_FILE_SUFFIX, PUBSEC_TYPE, PUBSEC_VERSION};
use crate::crypto::keys::{KeyPair, PublicKey};
use crate::error::{DunikeyError, Result};

/// A keypair on its way to or from an export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubSecFile {
    keypair: KeyPair,
}

impl PubSecFile {
    /// Wrap a keypair for export.
    pub fn new(keypair: KeyPair) -> Self {
        Self { keypair }
    }

    /// The keypair.
    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Unwrap into the keypair.
    pub fn into_keypair(self) -> KeyPair {
        self.keypair
    }

    /// The two-line export: `pub: …` then `sec: …`, no trailing newline.
    pub fn to_export_string(&self) -> String {
        format!(
            "pub: {}\nsec: {}",
            self.keypair.public_key().to_base58(),
            self.keypair.secret_key().to_base58()
        )
    }

    /// The full PubSec v1 file, with `Type` and `Version` headers.
    pub fn to_pubsec_string(&self) -> String {
        format!(
            "Type: {PUBSEC_TYPE}\nVersion: {PUBSEC_VERSION}\n{}",
            self.to_export_string()
        )
    }

    /// File name for an export: `<name>.dunikey.yml`.
    pub fn file_name(name: &str) -> String {
        format!("{name}{EXPORT_FILE_SUFFIX}")
    }

    /// Parse either export shape.
    ///
    /// `Type`/`Version` are optional but must say `PubSec`/`1` when present.
    /// `pub` and `sec` are required, each exactly once, and must agree: the
    /// secret key's public half has to be the stated public key.
    pub fn parse(text: &str) -> Result<Self> {
        let mut public: Option<&str> = None;
        let mut secret: Option<&str> = None;
        let mut file_type: Option<&str> = None;
        let mut version: Option<&str> = None;

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| malformed(format!("line {}: expected `key: value`", index + 1)))?;
            let slot = match key.trim() {
                "pub" => &mut public,
                "sec" => &mut secret,
                "Type" => &mut file_type,
                "Version" => &mut version,
                other => return Err(malformed(format!("line {}: unknown field {other:?}", index + 1))),
            };
            if slot.replace(value.trim()).is_some() {
                return Err(malformed(format!("line {}: duplicate field {:?}", index + 1, key.trim())));
            }
        }

        if let Some(t) = file_type {
            if t != PUBSEC_TYPE {
                return Err(malformed(format!("unsupported type {t:?}")));
            }
        }
        if let Some(v) = version {
            if v.parse::<u32>().ok() != Some(PUBSEC_VERSION) {
                return Err(malformed(format!("unsupported version {v:?}")));
            }
        }

        let public = public.ok_or_else(|| malformed("missing `pub` field".to_string()))?;
        let secret = secret.ok_or_else(|| malformed("missing `sec` field".to_string()))?;

        // Don't echo secret-key characters back in the error.
        let secret_bytes = BASE58
            .decode_unsafe(secret)
            .ok_or_else(|| malformed("`sec` is not valid base-58".to_string()))?;
        let keypair = KeyPair::from_secret_key(&secret_bytes)
            .map_err(|_| malformed("`sec` is not a consistent 64-byte secret key".to_string()))?;

        let stated = PublicKey::from_base58_padded(public)
            .map_err(|e| malformed(format!("`pub`: {e}")))?;
        if stated != *keypair.public_key() {
            return Err(malformed("`pub` does not match `sec`".to_string()));
        }

        tracing::debug!(public_key = %stated, "parsed key file");
        Ok(Self { keypair })
    }
}

fn malformed(reason: String) -> DunikeyError {
    DunikeyError::MalformedKeyFile(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{derive_keypair, Seed};

    fn sample() -> PubSecFile {
        PubSecFile::new(derive_keypair(&Seed::from_bytes([13u8; 32])))
    }

    #[test]
    fn test_export_shape() {
        let file = sample();
        let text = file.to_export_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("pub: {}", file.keypair().public_key().to_base58()));
        assert_eq!(lines[1], format!("sec: {}", file.keypair().secret_key().to_base58()));
    }

    #[test]
    fn test_pubsec_shape() {
        let text = sample().to_pubsec_string();
        assert!(text.starts_with("Type: PubSec\nVersion: 1\npub: "));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_parse_both_shapes() {
        let file = sample();
        assert_eq!(PubSecFile::parse(&file.to_export_string()).unwrap(), file);
        assert_eq!(PubSecFile::parse(&file.to_pubsec_string()).unwrap(), file);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_crlf() {
        let file = sample();
        let text = format!("\r\n  {}\r\n\r\n", file.to_pubsec_string().replace('\n', "\r\n"));
        assert_eq!(PubSecFile::parse(&text).unwrap(), file);
    }

    #[test]
    fn test_parse_rejects_mismatched_pub() {
        let file = sample();
        let other = derive_keypair(&Seed::from_bytes([14u8; 32]));
        let text = format!(
            "pub: {}\nsec: {}",
            other.public_key().to_base58(),
            file.keypair().secret_key().to_base58()
        );
        assert!(matches!(
            PubSecFile::parse(&text),
            Err(DunikeyError::MalformedKeyFile(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_headers_and_fields() {
        let body = sample().to_export_string();
        for text in [
            format!("Type: WIF\n{body}"),
            format!("Version: 2\n{body}"),
            format!("{body}\npub: 1111"),
            format!("{body}\ncomment: hi"),
            format!("{body}\njust some words"),
            body.lines().next().unwrap().to_string(),
        ] {
            assert!(PubSecFile::parse(&text).is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_parse_error_does_not_echo_secret() {
        let file = sample();
        let secret = file.keypair().secret_key().to_base58();
        let corrupted = format!("{}0", &secret[..secret.len() - 1]);
        let text = format!("pub: {}\nsec: {}", file.keypair().public_key(), corrupted);
        let err = PubSecFile::parse(&text).unwrap_err().to_string();
        assert!(!err.contains(&corrupted));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(PubSecFile::file_name("alice"), "alice.dunikey.yml");
    }
}
