//! Content digest validation and canonicalization.
//!
//! Registries publish digests as `<algorithm>:<hex>`. Some emit bare hex and
//! leave the algorithm implied; that form is accepted for sha256 only and
//! rewritten into the canonical `sha256:<hex>` form. The validated value is
//! held as an `oci_spec::image::Digest` so it interoperates with other OCI
//! tooling.

use crate::error::{Result, RegistryError};
use oci_spec::image::Digest as OciDigest;
use std::fmt;
use std::str::FromStr;


/// Digest algorithms a registry may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Looks up an algorithm by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// The algorithm name as it appears before the colon.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Number of hex characters in an encoded hash.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated content digest in canonical `algorithm:hex` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    inner: OciDigest,
}

impl Digest {
    /// Validates `raw` and returns the canonical digest.
    ///
    /// # Errors
    ///
    /// - `UnsupportedAlgorithm` when the algorithm token is not sha256, sha384 or sha512
    /// - `MalformedDigest` when the input is empty, the algorithm token is empty,
    ///   or the hash has the wrong length or anything other than lowercase hex
    ///
    /// # Examples
    ///
    /// ```
    /// use libvc::digest::{Digest, DigestAlgorithm};
    ///
    /// let hex = "7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc";
    /// let digest = Digest::parse(hex).unwrap();
    /// assert_eq!(digest.algorithm(), DigestAlgorithm::Sha256);
    /// assert_eq!(digest.to_string(), format!("sha256:{}", hex));
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(RegistryError::malformed_digest(raw, "digest is empty"));
        }

        let (algorithm, hex) = match raw.split_once(':') {
            Some(("", _)) => {
                return Err(RegistryError::malformed_digest(raw, "missing algorithm"));
            }
            Some((name, hex)) => {
                let algorithm = DigestAlgorithm::from_name(name)
                    .ok_or_else(|| RegistryError::unsupported_algorithm(name, raw))?;
                (algorithm, hex)
            }
            None => (DigestAlgorithm::Sha256, raw),
        };

        if hex.len() != algorithm.hex_len() {
            return Err(RegistryError::malformed_digest(
                raw,
                format!(
                    "{} hash must be {} characters, got {}",
                    algorithm,
                    algorithm.hex_len(),
                    hex.len()
                ),
            ));
        }

        if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(RegistryError::malformed_digest(
                raw,
                "hash must contain only lowercase hex characters",
            ));
        }

        let canonical = format!("{}:{}", algorithm, hex);
        let inner = OciDigest::from_str(&canonical)
            .map_err(|e| RegistryError::malformed_digest(raw, e.to_string()))?;

        Ok(Self { algorithm, inner })
    }

    /// Returns the digest algorithm.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Returns the hex-encoded hash without the algorithm prefix.
    pub fn hex(&self) -> &str {
        self.inner.digest()
    }

    /// Returns the underlying OCI digest.
    pub fn as_oci(&self) -> &OciDigest {
        &self.inner
    }
}

impl FromStr for Digest {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// Validates a raw digest and returns its canonical string form.
///
/// # Examples
///
/// ```
/// let sha = "sha256:7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc";
/// assert_eq!(libvc::digest::parse_digest(sha).unwrap(), sha);
/// assert!(libvc::digest::parse_digest("md5:abc").is_err());
/// ```
pub fn parse_digest(raw: &str) -> Result<String> {
    Digest::parse(raw).map(|d| d.to_string())
}
