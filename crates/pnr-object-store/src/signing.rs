//! Request signing.
//!
//! Signed parameters are sorted by name, joined as `k=v` pairs with `&`, the
//! API secret is appended, and the result is hashed and hex-encoded. The hash
//! is SHA-1 unless the account is configured for SHA-256. `file`, `api_key`
//! and the signature itself are never signed.

use std::str::FromStr;

use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Digest used to sign upload requests.
///
/// Must match the account's signature setting; the store rejects anything
/// else with "Invalid Signature".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// Account default.
    #[default]
    Sha1,
    Sha256,
}

impl FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("unsupported signature algorithm `{other}`")),
        }
    }
}

/// Compute the request signature over `params`.
pub fn sign(params: &[(&str, &str)], api_secret: &str, algorithm: SignatureAlgorithm) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let canonical = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    match algorithm {
        SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&canonical, api_secret),
        SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&canonical, api_secret),
    }
}

fn hex_digest<D: Digest>(canonical: &str, api_secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(canonical.as_bytes());
    hasher.update(api_secret.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
