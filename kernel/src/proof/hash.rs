//! Content hashing with domain separation.
//!
//! Algorithm: SHA-256. Every digest in the workspace is produced by
//! [`canonical_hash`] under one of the null-terminated domain prefixes below,
//! so equal bytes hashed for different purposes never collide.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
///
/// Invariant: the inner string contains a `:` separator with non-empty
/// substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the colon is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., `"sha256"`).
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full `"algorithm:hex_digest"` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl TryFrom<String> for ContentHash {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("malformed content hash: {value}"))
    }
}

impl From<ContentHash> for String {
    fn from(value: ContentHash) -> Self {
        value.full
    }
}

/// Domain prefix for state fingerprints (textual form of a state).
pub const DOMAIN_STATE: &[u8] = b"STATESPACE::STATE::V1\0";

/// Domain prefix for operator registry digests.
pub const DOMAIN_OPERATOR_REGISTRY: &[u8] = b"STATESPACE::OPERATOR_REGISTRY::V1\0";

/// Domain prefix for search trace digests.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"STATESPACE::SEARCH_TRACE::V1\0";

/// Domain prefix for run report digests.
pub const DOMAIN_RUN_REPORT: &[u8] = b"STATESPACE::RUN_REPORT::V1\0";

/// Compute the SHA-256 hash of `data` under a domain prefix.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{digest}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_parse_valid() {
        let h = ContentHash::parse("sha256:abcdef0123456789").unwrap();
        assert_eq!(h.algorithm(), "sha256");
        assert_eq!(h.hex_digest(), "abcdef0123456789");
        assert_eq!(h.as_str(), "sha256:abcdef0123456789");
    }

    #[test]
    fn content_hash_parse_rejects_bad_format() {
        assert!(ContentHash::parse("nocolon").is_none());
        assert!(ContentHash::parse(":noalg").is_none());
        assert!(ContentHash::parse("nodigest:").is_none());
    }

    #[test]
    fn canonical_hash_is_sha256_of_prefix_and_data() {
        let h = canonical_hash(b"", b"abc");
        assert_eq!(
            h.hex_digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(h.algorithm(), "sha256");
    }

    #[test]
    fn domains_separate_equal_payloads() {
        let a = canonical_hash(DOMAIN_STATE, b"same");
        let b = canonical_hash(DOMAIN_SEARCH_TRACE, b"same");
        assert_ne!(a, b);
    }

    #[test]
    fn domain_prefixes_are_null_terminated() {
        for prefix in [
            DOMAIN_STATE,
            DOMAIN_OPERATOR_REGISTRY,
            DOMAIN_SEARCH_TRACE,
            DOMAIN_RUN_REPORT,
        ] {
            assert!(prefix.ends_with(&[0]));
        }
    }

    #[test]
    fn content_hash_serde_round_trips_through_string() {
        let h = canonical_hash(DOMAIN_STATE, b"x");
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", h.as_str()));
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
