//! # Key Stretching
//!
//! Turns a low-entropy password plus a salt into a 32-byte [`Seed`] with
//! scrypt. The cost is the point: every guess an attacker makes pays the
//! same CPU and memory bill we do.
//!
//! ## Normalization
//!
//! Both inputs go through Unicode NFKC before they reach scrypt. Without it,
//! `"é"` typed on one keyboard (U+00E9) and `"é"` pasted from somewhere else
//! (U+0065 U+0301) would be different passwords, and the user would have two
//! identities and no idea why.
//!
//! ## Parameters are part of the identity
//!
//! scrypt cannot tell "wrong parameters" from "different password". Run it
//! with a different `log_n`, `r` or `p` and it happily hands back a seed,
//! just not *your* seed. See [`StretchParams`].
//!
//! ## Logging
//!
//! Parameters and timings are logged at `debug`. Passwords, salts and seeds
//! are never logged.

use std::time::Instant;

use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, Zeroizing};

use super::keys::Seed;
use crate::config::{StretchParams, SEED_LENGTH};
use crate::error::{DunikeyError, Result};

/// NFKC-normalize a credential string.
pub fn normalize(input: &str) -> String {
    input.nfkc().collect()
}

/// Stretch `password` with `salt` into a seed, off the async executor.
///
/// scrypt runs on tokio's blocking pool, so a slow derivation does not
/// stall other tasks. Dropping the returned future abandons the result;
/// the computation finishes in the background and is discarded.
///
/// # Errors
///
/// [`DunikeyError::Derivation`] if scrypt rejects the parameters, the memory
/// cost is out of bounds, or the background task dies.
pub async fn stretch(password: &str, salt: &str, params: &StretchParams) -> Result<Seed> {
    let password = Zeroizing::new(normalize(password));
    let salt = normalize(salt);
    let params = *params;

    let started = Instant::now();
    let seed = tokio::task::spawn_blocking(move || {
        run_scrypt(password.as_bytes(), salt.as_bytes(), &params)
    })
    .await
    .map_err(|e| DunikeyError::Derivation(format!("stretch task failed: {e}")))??;

    tracing::debug!(
        version = params.version,
        log_n = params.log_n,
        r = params.r,
        p = params.p,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "seed stretched"
    );
    Ok(seed)
}

/// Same as [`stretch`], on the calling thread.
pub fn stretch_blocking(password: &str, salt: &str, params: &StretchParams) -> Result<Seed> {
    let password = Zeroizing::new(normalize(password));
    let salt = normalize(salt);
    run_scrypt(password.as_bytes(), salt.as_bytes(), params)
}

fn run_scrypt(password: &[u8], salt: &[u8], params: &StretchParams) -> Result<Seed> {
    let memory = params.memory_cost()?;
    let scrypt_params = scrypt::Params::new(params.log_n, params.r, params.p, SEED_LENGTH)
        .map_err(|e| {
            tracing::warn!(
                log_n = params.log_n,
                r = params.r,
                p = params.p,
                "scrypt rejected stretch parameters"
            );
            DunikeyError::Derivation(format!("invalid scrypt parameters: {e}"))
        })?;

    tracing::trace!(memory_bytes = memory, "running scrypt");

    let mut output = [0u8; SEED_LENGTH];
    scrypt::scrypt(password, salt, &scrypt_params, &mut output)
        .map_err(|e| DunikeyError::Derivation(format!("scrypt failed: {e}")))?;

    let seed = Seed::from_bytes(output);
    output.zeroize();
    Ok(seed)
}
